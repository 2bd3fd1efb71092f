//! `gassi dialects` command - list supported backends.

use gassi_query::DialectFactory;

use crate::error::CliResult;
use crate::output;

/// Run the dialects command
pub fn run() -> CliResult<()> {
    output::header("Supported Databases");

    let factory = DialectFactory::new();
    for name in factory.list_supported() {
        let dialect = factory.get(&name)?;
        output::list_item(&name);
        output::kv("  auto increment", dialect.auto_increment());
        output::kv("  boolean", dialect.boolean_type());
        output::kv("  timestamp", dialect.timestamp_type());
        output::kv("  placeholders", &dialect.placeholders(2));
    }

    output::newline();
    output::info("Aliases: postgresql -> postgres; an empty type selects sqlite");
    Ok(())
}
