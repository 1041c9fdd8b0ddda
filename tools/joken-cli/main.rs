use clap::{Parser, Subcommand};
use joken::prelude::*;
use std::fs;
use std::time::Instant;

/// Decode, re-encode and check form logic rules
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the form definition JSON file (variables and components)
    #[arg(short, long)]
    form: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode stored rules into editor state and print it as JSON
    Decode {
        /// Path to the stored rules JSON file
        rules_path: String,
    },
    /// Encode editor state (as printed by `decode`) back into stored rules
    Encode {
        /// Path to the decoded rules JSON file
        decoded_path: String,
    },
    /// Report raw fallbacks and advisory problems for stored rules
    Check {
        /// Path to the stored rules JSON file
        rules_path: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let form = FormRegistry::from_file(&cli.form)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load form definition: {}", e)));
    let codec = RuleCodec::for_form(&form);

    match cli.command {
        Command::Decode { rules_path } => run_decode(&codec, &rules_path),
        Command::Encode { decoded_path } => run_encode(&codec, &decoded_path),
        Command::Check { rules_path } => run_check(&codec, &rules_path),
    }
}

fn load_rules(path: &str) -> Vec<LogicRule> {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read rules file '{}': {}", path, e)));
    serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse rules JSON: {}", e)))
}

fn run_decode(codec: &RuleCodec<'_>, rules_path: &str) {
    let rules = load_rules(rules_path);
    let decoded = codec.decode_rules(&rules);
    let output = serde_json::to_string_pretty(&decoded)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize decoded rules: {}", e)));
    println!("{}", output);
}

fn run_encode(codec: &RuleCodec<'_>, decoded_path: &str) {
    let json = fs::read_to_string(decoded_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read decoded rules file '{}': {}",
            decoded_path, e
        ))
    });
    let decoded: Vec<DecodedRule> = serde_json::from_str(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse decoded rules JSON: {}", e)));

    let mut rules = Vec::with_capacity(decoded.len());
    for rule in &decoded {
        match codec.encode_rule(rule) {
            Ok(encoded) => rules.push(encoded),
            Err(e) => exit_with_error(&format!("Failed to encode rule '{}': {}", rule.id, e)),
        }
    }
    let output = serde_json::to_string_pretty(&rules)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize rules: {}", e)));
    println!("{}", output);
}

fn run_check(codec: &RuleCodec<'_>, rules_path: &str) {
    let start = Instant::now();
    let rules = load_rules(rules_path);
    let decoded = codec.decode_rules(&rules);

    let mut raw_count = 0;
    let mut problem_count = 0;
    for rule in &decoded {
        let label = if rule.description.is_empty() {
            rule.id.clone()
        } else {
            format!("{} ({})", rule.id, rule.description)
        };

        if let TriggerView::Raw { reason, .. } = &rule.trigger {
            raw_count += 1;
            println!("[raw] {} trigger: {}", label, reason);
        }
        for (idx, action) in rule.actions.iter().enumerate() {
            if let ActionView::Raw { reason, .. } = action {
                raw_count += 1;
                println!("[raw] {} actions[{}]: {}", label, idx, reason);
            }
        }
        for problem in codec.problems(rule) {
            problem_count += 1;
            println!("[warn] {} {}", label, problem);
        }
        if let TriggerView::Structured { trigger } = &rule.trigger {
            log::debug!("{}: when {}", label, trigger);
        }
    }

    println!("\n--- Check Summary ---");
    println!("Rules:            {}", decoded.len());
    println!("Raw fallbacks:    {}", raw_count);
    println!("Problems:         {}", problem_count);
    println!("Duration:         {:?}", start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
