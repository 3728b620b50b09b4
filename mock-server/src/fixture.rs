//! Deterministic seed data for the in-memory catalog.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::Beer;

const NAMES: [(&str, &str); 30] = [
    ("Mango Bobs", "ALE"),
    ("Galaxy Cat", "PALE_ALE"),
    ("No Hammers On The Bar", "WHEAT"),
    ("Blessed", "STOUT"),
    ("Adjunct Trail", "STOUT"),
    ("Very GGGreenn", "IPA"),
    ("Double Barrel Hunahpu's", "STOUT"),
    ("Very Hazy", "IPA"),
    ("SR-71", "STOUT"),
    ("Pliny the Younger", "IPA"),
    ("Blessed Again", "STOUT"),
    ("Coast Guard", "LAGER"),
    ("Pinball Porter", "PORTER"),
    ("Golden Budda", "STOUT"),
    ("Grand Central Red", "LAGER"),
    ("Pac-Man", "STOUT"),
    ("Ro Sham Bo", "IPA"),
    ("Summer Wheatly", "WHEAT"),
    ("Java Jill", "LAGER"),
    ("Bike Trail Pale", "PALE_ALE"),
    ("N.Z.P", "IPA"),
    ("Stawberry Blond", "WHEAT"),
    ("Loco", "PORTER"),
    ("Spocktoberfest", "STOUT"),
    ("Beach Blond Ale", "ALE"),
    ("Bimini Twist IPA", "IPA"),
    ("Rod Bender Red Ale", "ALE"),
    ("Floating Dock", "SAISON"),
    ("El Hefe", "WHEAT"),
    ("Urban Haze", "IPA"),
];

/// Thirty beers with stable ids (`00000000-…-0001` onwards), unique
/// 12-digit UPCs and inventory on hand.
pub fn beers() -> Vec<Beer> {
    let now = Utc::now();
    NAMES
        .iter()
        .enumerate()
        .map(|(i, (name, style))| {
            let n = i as u32 + 1;
            Beer {
                id: Some(Uuid::from_u128(u128::from(n))),
                version: Some(0),
                beer_name: name.to_string(),
                beer_style: style.to_string(),
                upc: Some(format!("06312342{n:04}")),
                price: Decimal::new(1095 + i64::from(n) * 50, 2),
                quantity_on_hand: Some(100 + n as i32 * 7),
                created_date: Some(now),
                last_updated_date: Some(now),
            }
        })
        .collect()
}
