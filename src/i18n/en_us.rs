// ============================================================================
// FaqDesk - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English translation content definition
// 边界:
//   - ✅ English translation strings definition
//   - ✅ Translation key-value pairs maintenance
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain business logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Init command
    ("init.start", "Initializing FaqDesk configuration..."),
    ("init.config_exists", "Configuration file already exists: {}"),
    ("init.use_force_hint", "Use --force to overwrite it"),
    ("init.config_created", "Configuration file created: {}"),
    (
        "init.next_steps",
        "Edit the [api] section to point at your server, then run `faqdesk list`",
    ),
    ("init.create_failed", "Failed to create configuration file: {}"),
    // List command
    ("list.loading", "Loading records..."),
    ("list.empty", "No records found"),
    ("list.header", "Page {} of {} ({} records)"),
    ("list.columns", "Translations           Question (en)"),
    ("list.legend", "● saved  ○ missing"),
    ("list.no_default_copy", "(no English copy)"),
    ("list.page_out_of_range", "Page {} is out of range (1..{})"),
    ("list.failed", "Could not load the record list"),
    // Show command
    ("show.loading", "Loading record {}..."),
    ("show.not_found", "Record {} not found"),
    ("show.new", "New record"),
    ("show.title", "Record {}"),
    ("show.empty_field", "(empty)"),
    ("show.no_translations", "No translations saved yet"),
    ("show.failed", "Could not load the record"),
    // Save command
    ("save.start", "Saving {} translation..."),
    ("save.failed", "Save failed"),
    (
        "save.next_locale_hint",
        "Add more languages with `faqdesk save --id {} -L <locale> ...`",
    ),
    // Delete command
    ("delete.confirm", "Delete record {} \"{}\"? [y/N] "),
    ("delete.declined", "Deletion cancelled"),
    ("delete.remaining", "{} records remaining"),
    ("delete.failed", "Delete failed"),
    // Interactive editor
    (
        "edit.help",
        "Commands: tab <locale> | q <question> | a <answer> | show | tabs | save | delete | help | quit",
    ),
    ("edit.prompt", "[{}]> "),
    ("edit.unknown_command", "Unknown command: {} (type `help`)"),
    ("edit.field_updated", "{} updated for {}"),
    ("edit.confirm_delete", "Delete this record and all its translations? [y/N] "),
    ("edit.unsaved_discarded", "Unsaved changes discarded: {}"),
    // Editor notifications
    ("editor.created", "Created record {} with {} translation"),
    ("editor.saved", "Saved {} translation of record {}"),
    ("editor.deleted", "Deleted record {}"),
    ("editor.error_prefix", "Error:"),
    // Offline mode
    (
        "offline.notice",
        "Offline mode: changes are kept in memory and lost on exit",
    ),
];
