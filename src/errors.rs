use fractic_server_error::define_client_error;

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_client_error!(WriteError, "Error writing file.");

// Parsing-related.
define_client_error!(InvalidCsv, "Invalid CSV format.");
define_client_error!(InvalidCsvContent, "Invalid CSV content: {details}.", { details: &str });
define_client_error!(InvalidJson, "Invalid {json_type} (invalid JSON format).", { json_type: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });
define_client_error!(
    InvalidAccountingAmount,
    "Invalid accounting amount: '{value}'.",
    { value: &str }
);

// Mapping-related.
define_client_error!(
    InvalidMatchPattern,
    "Invalid account pattern '{pattern}' for note {note}.",
    { pattern: &str, note: &str }
);
define_client_error!(
    InvalidFormatting,
    "Invalid formatting configuration: {details}.",
    { details: &str }
);

// Template-related.
define_client_error!(
    UnknownTemplateNote,
    "Note template '{title}' has no note number, and its title does not appear in the note titles table.",
    { title: &str }
);
define_client_error!(
    DuplicateNoteTemplate,
    "More than one template was provided for note {note}.",
    { note: &str }
);
define_client_error!(
    UnreplacedPlaceholdersRemain,
    "Note {note} still contains placeholders with no computed value: {keys}.",
    { note: &str, keys: &str }
);
define_client_error!(
    CategoryTotalMismatch,
    "Note {note}, category '{category}' ({period}): stated total {stated} does not equal the sum of its line items ({computed}).",
    { note: &str, category: &str, period: &str, stated: f64, computed: f64 }
);
