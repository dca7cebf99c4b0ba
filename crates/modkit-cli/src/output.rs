use colored::Colorize;

use modkit_discovery::ModuleRecord;

/// Human listing of discovered modules, one per line. `noun` names what
/// was listed ("modules" or "plugin modules").
pub fn render(records: &[ModuleRecord], noun: &str) {
    if records.is_empty() {
        println!("No {noun} found.");
        return;
    }

    for record in records {
        let tag = if record.is_configured() {
            format!(" {}", "[plugin]".green())
        } else {
            String::new()
        };
        println!(
            " {} {}{}",
            record.package.display_name().bold().blue(),
            record.realpath.display().to_string().dimmed(),
            tag
        );
    }

    println!();
    println!("{}: {}", format!("Total {noun}").bold(), records.len());
}
