use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{LedgerEntry, NoteInputs, Periods, ScheduleIiiMapping};

#[async_trait]
pub trait NotesRepository: Send + Sync {
    /// The embedded default mapping, with `config` (JSON or RON) merged over
    /// it when given.
    fn mapping_from_string(&self, config: Option<&str>) -> Result<ScheduleIiiMapping, ServerError>;

    fn mapping_from_file<P>(&self, config: Option<P>) -> Result<ScheduleIiiMapping, ServerError>
    where
        P: AsRef<std::path::Path>;

    /// Trial balance as CSV or JSON, told apart by the first character.
    fn entries_from_string(
        &self,
        trial_balance: &str,
        periods: &Periods,
    ) -> Result<Vec<LedgerEntry>, ServerError>;

    /// Trial balance as CSV or JSON, told apart by the file extension.
    fn entries_from_file<P>(
        &self,
        trial_balance: P,
        periods: &Periods,
    ) -> Result<Vec<LedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path>;

    fn from_string(
        &self,
        trial_balance: &str,
        templates: &str,
        config: Option<&str>,
    ) -> Result<NoteInputs, ServerError>;

    async fn from_file<P>(
        &self,
        trial_balance: P,
        templates: P,
        config: Option<P>,
    ) -> Result<NoteInputs, ServerError>
    where
        P: AsRef<std::path::Path> + Send;
}
