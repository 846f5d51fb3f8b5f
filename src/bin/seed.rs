//! Fill the contacts table with generated people for local testing.
//!
//! Reads `DATABASE_URL` (same forms as the server) and `SEED_QUANTITY`
//! (default 360).

use anyhow::{Context, Result};
use chrono::{Datelike, Days, Local, NaiveDate};
use contacts_api::domain::{EmailAddress, PhoneNumber};
use contacts_api::repositories::{ContactRepository, SqliteContactRepository};
use contacts_api::{Config, ContactFields};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use std::env;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_QUANTITY: usize = 360;

const FIRST_NAMES: &[&str] = &[
    "Olena", "Andrii", "Iryna", "Taras", "Oksana", "Dmytro", "Nataliia", "Bohdan", "Sofiia",
    "Yurii", "Kateryna", "Mykola", "Hanna", "Serhii", "Liudmyla", "Petro",
];

const LAST_NAMES: &[&str] = &[
    "Shevchenko", "Kovalenko", "Bondarenko", "Tkachenko", "Kravchenko", "Melnyk", "Boiko",
    "Oliinyk", "Lysenko", "Marchenko", "Rudenko", "Savchenko", "Moroz", "Petrenko",
];

const DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

const WORDS: &[&str] = &[
    "met", "at", "the", "conference", "old", "friend", "from", "school", "neighbour", "likes",
    "coffee", "works", "in", "logistics", "call", "before", "noon",
];

fn pick<'a>(rng: &mut impl Rng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn phone(rng: &mut impl Rng) -> String {
    format!(
        "+38 ({:03}) {:03}-{:02}-{:02}",
        rng.gen_range(0..1000),
        rng.gen_range(0..1000),
        rng.gen_range(0..100),
        rng.gen_range(0..100)
    )
}

/// A birthday for someone aged 16 to 80.
fn birthday(rng: &mut impl Rng, today: NaiveDate) -> NaiveDate {
    let age_days = rng.gen_range(16 * 365..80 * 365);
    today
        .checked_sub_days(Days::new(age_days))
        .unwrap_or(today)
}

fn sentence(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(4..9);
    let mut words: Vec<&str> = (0..len).map(|_| pick(rng, WORDS)).collect();
    let mut text = words.remove(0).to_string();
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    for word in words {
        text.push(' ');
        text.push_str(word);
    }
    text.push('.');
    text
}

fn generate(rng: &mut impl Rng, today: NaiveDate, n: usize) -> Result<ContactFields> {
    let first_name = pick(rng, FIRST_NAMES).to_string();
    let last_name = pick(rng, LAST_NAMES).to_string();
    let email = format!(
        "{}.{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        n,
        pick(rng, DOMAINS)
    );

    Ok(ContactFields {
        email: EmailAddress::new(email)?,
        phone: PhoneNumber::new(phone(rng))?,
        birthday: birthday(rng, today),
        details: sentence(rng),
        first_name,
        last_name,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let path = Config::parse_database_url(&url)?;
    let quantity = match env::var("SEED_QUANTITY") {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("SEED_QUANTITY must be a number, got {}", raw))?,
        Err(_) => DEFAULT_QUANTITY,
    };

    let store = SqliteContactRepository::open(&path, Duration::from_secs(10)).await?;
    let today = Local::now().date_naive();

    info!(quantity, year = today.year(), "Filling contacts");
    let mut rng = thread_rng();
    for n in 0..quantity {
        let fields = generate(&mut rng, today, n)?;
        store.create(&fields).await?;
    }

    info!(
        calls = store.metrics().store_calls_total(),
        "Database filled successfully"
    );
    Ok(())
}
