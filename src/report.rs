use composer_core::{CrossTrainConfig, TriggerTargets};

mod ansi {
    pub const GREEN: &str = "32";
    pub const YELLOW: &str = "33";
    pub const BLUE: &str = "34";
    pub const CYAN: &str = "36";
    pub const GRAY: &str = "90";

    /// Wraps text in SGR escapes when color output is on.
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        fn sgr(&self, code: &str, s: &str) -> String {
            if self.enabled { format!("\x1b[{code}m{s}\x1b[0m") } else { s.to_string() }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.sgr(color, s.as_ref())
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.sgr("1", s.as_ref())
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.sgr("2", s.as_ref())
        }
    }
}

pub fn print_cross_train(config: &CrossTrainConfig, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint("⚙  Cross-train configuration", ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Files ━━━", ansi::GRAY));
    if config.is_empty() {
        println!("{}", palette.dim("  No dialog routes intents to child dialogs"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Dialogs have no LU recognizer bound");
        println!("  • OnIntent triggers name intents missing from the LU file");
        println!("  • No configured language is a LUIS locale");
        println!("\n{}", palette.dim("  Tip: Set RUST_LOG=composer_core=trace to see skipped dialogs"));
    } else {
        print_entries(config, &palette);
    }

    let gaps = config.gaps();
    println!("\n{}", palette.paint("━━━ Gaps ━━━", ansi::GRAY));
    if gaps.is_empty() {
        println!("  {}", palette.paint("✓ every routed intent has training data", ansi::GREEN));
    } else {
        for (file, intent) in &gaps {
            println!(
                "  {} {} {}",
                palette.paint("✗", ansi::YELLOW),
                palette.paint(*file, ansi::BLUE),
                palette.dim(format!("intent '{intent}' routes to dialogs without LU files"))
            );
        }
    }

    println!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    println!(
        "  Files: {}  │  Gaps: {}",
        palette.paint(config.len().to_string(), ansi::GREEN),
        palette.paint(gaps.len().to_string(), if gaps.is_empty() { ansi::GREEN } else { ansi::YELLOW }),
    );
    println!();
}

fn print_entries(config: &CrossTrainConfig, palette: &ansi::Palette) {
    for (idx, (file, entry)) in config.iter().enumerate() {
        let root = if entry.root_dialog { palette.paint("root", ansi::GREEN) } else { palette.dim("child") };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(file),
            palette.dim("│"),
            root
        );

        for (intent, targets) in &entry.triggers {
            let label = if intent.is_empty() { "(any)" } else { intent.as_str() };
            println!("      {} {}", palette.paint(label, ansi::CYAN), fmt_targets(targets, palette));
        }
    }
}

fn fmt_targets(targets: &TriggerTargets, palette: &ansi::Palette) -> String {
    match targets {
        TriggerTargets::NoDialog => palette.dim("no dialog"),
        TriggerTargets::Files(files) if files.is_empty() => palette.paint("→ (missing LU files)", ansi::YELLOW),
        TriggerTargets::Files(files) => palette.paint(format!("→ {}", files.join(", ")), ansi::BLUE),
    }
}
