//! Interactive elicitation session.
//!
//! Presents the discovered service buckets for multi-select, then walks the
//! selected buckets asking each question in order. All console I/O goes
//! through the [`Prompter`] trait so the session can be driven by scripted
//! input in tests.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::answers::AnswerRecord;
use crate::catalog::QuestionCatalog;

/// Bucket that is always included and always processed first when present.
pub const GENERAL_BUCKET: &str = "GENERAL";

/// Console seam for interactive input.
pub trait Prompter {
    /// Print a line to the operator.
    fn say(&mut self, text: &str);
    /// Ask for one line of input, returning it trimmed.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompter backed by stdin/stdout.
#[derive(Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Outcome of parsing one selection input against `item_count` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The literal `all` keyword.
    All,
    /// Parsed indices, 0-based. Out-of-range entries are reported as the
    /// 1-based values the operator typed; they are skipped, not fatal.
    Chosen {
        selected: Vec<usize>,
        out_of_range: Vec<usize>,
    },
    /// Not a recognizable selection; the caller should re-prompt.
    Invalid,
}

/// Parse a multi-select input: `all`, a single 1-based index, or a
/// comma-separated index list.
pub fn parse_selection(input: &str, item_count: usize) -> SelectionOutcome {
    let input = input.trim().to_lowercase();
    if input == "all" {
        return SelectionOutcome::All;
    }

    let mut selected = Vec::new();
    let mut out_of_range = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        let Ok(index) = token.parse::<usize>() else {
            return SelectionOutcome::Invalid;
        };
        if index >= 1 && index <= item_count {
            if !selected.contains(&(index - 1)) {
                selected.push(index - 1);
            }
        } else {
            out_of_range.push(index);
        }
    }

    SelectionOutcome::Chosen {
        selected,
        out_of_range,
    }
}

/// Interactive session collecting answers per selected service.
pub struct ElicitationSession<'a, P: Prompter> {
    prompter: &'a mut P,
}

impl<'a, P: Prompter> ElicitationSession<'a, P> {
    pub fn new(prompter: &'a mut P) -> Self {
        Self { prompter }
    }

    /// Run the full session: select services, then ask every question of
    /// every selected bucket in order. Returns raw answers keyed by service
    /// and ordinal.
    pub fn collect_answers(&mut self, catalog: &QuestionCatalog) -> io::Result<Vec<AnswerRecord>> {
        if catalog.is_empty() {
            return Ok(Vec::new());
        }

        let services = catalog.services();
        self.prompter
            .say(&format!("\nAvailable AWS services: {}", services.join(", ")));

        let mut selected = self.select_services(&services)?;

        // GENERAL is always asked, and asked first.
        if services.iter().any(|s| s == GENERAL_BUCKET) {
            selected.retain(|s| s != GENERAL_BUCKET);
            selected.insert(0, GENERAL_BUCKET.to_string());
        }

        let mut records = Vec::new();
        for service in &selected {
            let Some(set) = catalog.get(service) else {
                continue;
            };
            self.prompter
                .say(&format!("\nConfiguring {} service", service));
            for (index, question) in set.questions.iter().enumerate() {
                let ordinal = index + 1;
                self.prompter.say(&format!(
                    "\nQuestion {}/{} for {}:",
                    ordinal,
                    set.questions.len(),
                    service
                ));
                self.prompter.say(&format!("  {}", question));

                let text = self.ask_non_empty()?;
                records.push(AnswerRecord {
                    service: service.clone(),
                    ordinal,
                    text,
                });
            }
        }

        debug!("Collected {} answers across {} services", records.len(), selected.len());
        Ok(records)
    }

    /// Multi-select loop. Re-prompts until at least one valid service is
    /// chosen; out-of-range indices are warned and skipped individually.
    fn select_services(&mut self, services: &[String]) -> io::Result<Vec<String>> {
        self.prompter
            .say("\nWhich AWS services do you want to deploy?");
        self.prompter
            .say("Enter numbers separated by commas (e.g. 1,3,5) or 'all':");
        for (index, service) in services.iter().enumerate() {
            self.prompter.say(&format!("  {}. {}", index + 1, service));
        }

        loop {
            let input = self.prompter.ask("\nYour selection: ")?;
            match parse_selection(&input, services.len()) {
                SelectionOutcome::All => return Ok(services.to_vec()),
                SelectionOutcome::Chosen {
                    selected,
                    out_of_range,
                } => {
                    for index in out_of_range {
                        self.prompter
                            .say(&format!("Invalid selection: {}", index));
                    }
                    if selected.is_empty() {
                        self.prompter
                            .say("No valid services selected. Please try again.");
                        continue;
                    }
                    return Ok(selected.iter().map(|&i| services[i].clone()).collect());
                }
                SelectionOutcome::Invalid => {
                    self.prompter
                        .say("Invalid input. Enter numbers separated by commas or 'all'.");
                }
            }
        }
    }

    /// Ask until the operator gives a non-empty answer.
    fn ask_non_empty(&mut self) -> io::Result<String> {
        loop {
            let answer = self.prompter.ask("Your answer: ")?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.prompter.say("Please provide an answer.");
        }
    }
}
