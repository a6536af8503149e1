//! Motivational quotes shown when a study room phase changes.

use rand::seq::SliceRandom;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: [Quote; 8] = [
    Quote {
        text: "The future depends on what you do today.",
        author: "Mahatma Gandhi",
    },
    Quote {
        text: "Quality is not an act, it is a habit.",
        author: "Aristotle",
    },
    Quote {
        text: "The secret of getting ahead is getting started.",
        author: "Mark Twain",
    },
    Quote {
        text: "Don't watch the clock; do what it does. Keep going.",
        author: "Sam Levenson",
    },
    Quote {
        text: "The harder you work for something, the greater you'll feel when you achieve it.",
        author: "Unknown",
    },
    Quote {
        text: "Your time is limited, don't waste it living someone else's life.",
        author: "Steve Jobs",
    },
    Quote {
        text: "The best way to predict the future is to create it.",
        author: "Abraham Lincoln",
    },
    Quote {
        text: "Success is the sum of small efforts, repeated day in and day out.",
        author: "Robert Collier",
    },
];

pub fn random_quote() -> Quote {
    random_quote_with(&mut rand::thread_rng())
}

pub fn random_quote_with<R: rand::Rng + ?Sized>(rng: &mut R) -> Quote {
    *QUOTES.choose(rng).unwrap_or(&QUOTES[0])
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.author)
    }
}
