//! Versions command handler

use crate::config::Config;
use crate::parser::VersionResolver;

pub fn cmd_versions(config: &Config) -> anyhow::Result<()> {
    let resolver = VersionResolver::from_config(&config.parsing);

    if resolver.rules().is_empty() {
        println!("No version rules configured.");
        println!(
            "Every filename resolves to the default: {}",
            resolver.default_version()
        );
        println!();
        println!("Add rules under [[parsing.versions]] in config.toml");
        return Ok(());
    }

    println!("Version rules (evaluation order, first match wins)");
    println!("{:-<70}", "");

    for (i, rule) in resolver.rules().iter().enumerate() {
        let terms = if rule.terms.is_empty() {
            "(no terms - never matches)".to_string()
        } else {
            rule.terms.join(", ")
        };
        println!("{:>3}. {} : {}", i + 1, rule.name, terms);
    }

    println!();
    println!("Default (no match): {}", resolver.default_version());

    Ok(())
}
