use super::SubmissionOutcome;
use super::clock::{Clock, SystemClock};
use super::dates;
use crate::config::{FormConfig, InvalidDatePolicy};
use crate::error::BindError;
use crate::schema::{Record, SUBMIT_GROUP};
use crate::value::{FormValue, PostedValues, Value};
use tracing::{debug, warn};

/// Writes submitted values back onto a record and persists it.
pub struct SubmissionBinder<'a> {
    config: &'a FormConfig,
    clock: Box<dyn Clock + 'a>,
}

impl<'a> SubmissionBinder<'a> {
    pub fn new(config: &'a FormConfig) -> Self {
        Self {
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Clock used by `InvalidDatePolicy::CoerceToNow`.
    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Binds `values` onto `record`, then validates and inserts or updates it.
    ///
    /// Every value is converted before any is assigned, so an unreadable date leaves
    /// the record untouched. Values for names the record does not have are ignored.
    /// A record whose key field is empty is inserted; otherwise it is updated.
    ///
    /// `pre_process` always runs first. `post_process` runs after persistence or a
    /// validation rejection, never after an error is returned.
    pub fn process<R: Record + ?Sized>(
        &self,
        record: &mut R,
        values: &PostedValues,
    ) -> Result<SubmissionOutcome, BindError> {
        record.pre_process(values);

        let mut assignments = Vec::with_capacity(values.len());
        for (name, value) in values.iter() {
            if name == SUBMIT_GROUP {
                continue;
            }
            if !record.has_field(name) {
                debug!(field = name, "skipping value for unknown field");
                continue;
            }
            assignments.push((name, self.convert(name, value)?));
        }
        for (name, value) in assignments {
            record.set(name, value)?;
        }

        if self.config.validate_on_process {
            if let Err(errors) = record.validate() {
                if !errors.is_empty() {
                    debug!(table = record.table_name(), %errors, "submission rejected");
                    record.post_process(values);
                    return Ok(SubmissionOutcome::Rejected(errors));
                }
            }
        }

        let key_is_set = record
            .key_field()
            .and_then(|key| record.get(&key))
            .is_some_and(|value| !value.is_empty());
        let outcome = if key_is_set {
            record.update()?;
            SubmissionOutcome::Updated
        } else {
            let id = record.insert()?;
            SubmissionOutcome::Inserted { id }
        };
        debug!(table = record.table_name(), ?outcome, "submission persisted");

        record.post_process(values);
        Ok(outcome)
    }

    /// Converts one submitted value to its stored form.
    pub fn convert(&self, field: &str, value: &FormValue) -> Result<Value, BindError> {
        let storage = self.config.date_storage;
        match value {
            FormValue::Scalar(value) => Ok(value.clone()),
            FormValue::Date(parts) => dates::join_date(parts, storage).map_or_else(
                || {
                    self.coerce(field, BindError::InvalidDate {
                        field: field.to_string(),
                        parts: *parts,
                    })
                    .map(|now| dates::store_date(now.date(), storage))
                },
                Ok,
            ),
            FormValue::Time(parts) => dates::join_time(parts).map_or_else(
                || {
                    self.coerce(field, BindError::InvalidTime {
                        field: field.to_string(),
                        parts: *parts,
                    })
                    .map(|now| dates::store_time(now.time()))
                },
                Ok,
            ),
            FormValue::DateTime(parts) => dates::join_datetime(parts, storage).map_or_else(
                || {
                    self.coerce(field, BindError::InvalidDate {
                        field: field.to_string(),
                        parts: parts.date,
                    })
                    .map(|now| dates::store_datetime(now, storage))
                },
                Ok,
            ),
        }
    }

    fn coerce(&self, field: &str, error: BindError) -> Result<chrono::NaiveDateTime, BindError> {
        match self.config.invalid_date_policy {
            InvalidDatePolicy::Reject => Err(error),
            InvalidDatePolicy::CoerceToNow => {
                warn!(field, %error, "substituting the current date");
                Ok(self.clock.now())
            }
        }
    }
}
