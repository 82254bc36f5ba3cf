use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, using the column names of a Scopus CSV export.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Authors")]
    authors: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Source title")]
    source: &'static str,
    /// Blank when the paper has never been cited.
    #[serde(rename = "Cited by")]
    cited_by: Option<u32>,
    #[serde(rename = "Index Keywords")]
    index_keywords: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

const SURNAMES: [&str; 12] = [
    "Hart", "Kolter", "Zoha", "Kelly", "Parson", "Makonin", "Batra", "Zeifman", "Bonfigli",
    "Mauch", "Kim", "Liang",
];
const INITIALS: [&str; 6] = ["G.W.", "J.Z.", "A.", "J.", "O.", "S."];
const TOPICS: [&str; 8] = [
    "Non-intrusive load monitoring",
    "Energy disaggregation",
    "Appliance recognition",
    "Smart meter analytics",
    "Deep learning for load disaggregation",
    "Hidden Markov models of appliances",
    "Event detection in power signals",
    "Residential demand response",
];
const KEYWORDS: [&str; 12] = [
    "Load monitoring",
    "Energy disaggregation",
    "Smart meters",
    "Electric power measurement",
    "Hidden Markov models",
    "Deep learning",
    "Energy utilization",
    "Houses",
    "Signal processing",
    "Electric load management",
    "Neural networks",
    "Classification (of information)",
];
const SOURCES: [&str; 4] = [
    "Proceedings of the IEEE",
    "Energy and Buildings",
    "IEEE Transactions on Smart Grid",
    "Applied Energy",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = Path::new("datasets/sample_publications.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let n_rows = 400;
    for i in 0..n_rows {
        // Later years get more papers, older papers more citations.
        let year = 1990 + (rng.next_f64().sqrt() * 35.0) as i32;
        let age = f64::from(2025 - year).max(1.0);

        let n_authors = 1 + rng.below(4);
        let authors: Vec<String> = (0..n_authors)
            .map(|_| format!("{}, {}", rng.pick(&SURNAMES), rng.pick(&INITIALS)))
            .collect();

        let cited_by = if rng.next_f64() < 0.1 {
            None
        } else {
            Some((rng.next_f64().powi(3) * age * 40.0) as u32)
        };

        let index_keywords = if rng.next_f64() < 0.08 {
            String::new()
        } else {
            let n_keywords = 1 + rng.below(5);
            (0..n_keywords)
                .map(|_| rng.pick(&KEYWORDS))
                .collect::<Vec<_>>()
                .join("; ")
        };

        writer
            .serialize(Row {
                authors: authors.join(", "),
                title: format!("{} ({})", rng.pick(&TOPICS), i + 1),
                year,
                source: rng.pick(&SOURCES),
                cited_by,
                index_keywords,
            })
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} publications to {}", output_path.display());
    Ok(())
}
