// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod mapping_config_datasource;
        pub(crate) mod note_templates_datasource;
        pub(crate) mod trial_balance_csv_datasource;
        pub(crate) mod trial_balance_json_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod accounting_amount_model;
        pub(crate) mod mapping_config_model;
        pub(crate) mod note_template_model;
        pub(crate) mod trial_balance_record_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod notes_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod classification;
        pub(crate) mod generated_notes;
        pub(crate) mod ledger_entry;
        pub(crate) mod mapping;
        pub(crate) mod mapping_summary;
        pub(crate) mod note_figures;
        pub(crate) mod note_id;
        pub(crate) mod note_template;
        pub(crate) mod template_generator;
        pub(crate) mod validation_issue;
    }
    pub(crate) mod logic {
        pub(crate) mod account_classifier;
        pub(crate) mod aggregator;
        pub(crate) mod mapping_statistics;
        pub(crate) mod note_validator;
        pub(crate) mod placeholder_values;
        pub(crate) mod template_filler;
        pub(crate) mod utils;

        #[cfg(test)]
        pub(crate) mod test_support;
    }
    pub(crate) mod repositories {
        pub(crate) mod notes_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod generate_notes_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod notes_json_printer;
    pub(crate) mod notes_summary_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::classification::*;
        pub use crate::domain::entities::generated_notes::*;
        pub use crate::domain::entities::ledger_entry::*;
        pub use crate::domain::entities::mapping::*;
        pub use crate::domain::entities::mapping_summary::*;
        pub use crate::domain::entities::note_figures::*;
        pub use crate::domain::entities::note_id::*;
        pub use crate::domain::entities::note_template::*;
        pub use crate::domain::entities::template_generator::*;
        pub use crate::domain::entities::validation_issue::*;
    }
}
