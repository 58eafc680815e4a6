use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

use inferno_journal::journal::{ExitDetails, ExitPrompt};
use inferno_journal::models::{Trade, TradeRatings};

/// Reads exit details from stdin without blocking the runtime.
/// An empty line (or EOF) at the price question dismisses the prompt.
pub struct StdinExitPrompt {
    reader: Mutex<BufReader<Stdin>>,
    ask_ratings: bool,
}

impl StdinExitPrompt {
    pub fn new(ask_ratings: bool) -> Self {
        Self {
            reader: Mutex::new(BufReader::new(tokio::io::stdin())),
            ask_ratings,
        }
    }

    async fn ask(&self, question: &str) -> Option<String> {
        print!("{} ", question);
        std::io::stdout().flush().ok();

        let mut line = String::new();
        let mut reader = self.reader.lock().await;
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let answer = line.trim().to_string();
                if answer.is_empty() {
                    None
                } else {
                    Some(answer)
                }
            }
        }
    }

    async fn ask_rating(&self, question: &str, default: u8) -> u8 {
        self.ask(question)
            .await
            .and_then(|s| s.parse::<u8>().ok())
            .map(|r| r.clamp(1, 5))
            .unwrap_or(default)
    }
}

#[async_trait]
impl ExitPrompt for StdinExitPrompt {
    async fn exit_details(&self, trade: &Trade) -> Option<ExitDetails> {
        let question = format!(
            "Exit price for {} {} (entry {})?",
            trade.side.as_str().to_uppercase(),
            trade.ticker_pair,
            trade.entry
        );
        let exit_price = loop {
            let answer = self.ask(&question).await?;
            match answer.parse::<f64>() {
                Ok(p) => break p,
                Err(_) => println!("Not a number: {}", answer),
            }
        };

        if !self.ask_ratings {
            return Some(ExitDetails::price(exit_price));
        }

        let defaults = TradeRatings::default();
        let execution_rating = self
            .ask_rating("Execution rating 1-5 [4]?", defaults.execution_rating)
            .await;
        let discipline_rating = self
            .ask_rating("Discipline rating 1-5 [4]?", defaults.discipline_rating)
            .await;
        let learnings = self
            .ask("Learnings?")
            .await
            .unwrap_or(defaults.learnings);

        Some(ExitDetails {
            exit_price,
            ratings: Some(TradeRatings {
                execution_rating,
                discipline_rating,
                learnings,
            }),
        })
    }
}
