//! Built-in demo roster
//!
//! The four accounts the demo starts with when no roster file is given.

use crate::types::{AccountProfile, Pin};
use rust_decimal::Decimal;

fn profile(owner: &str, movements: &[i64], interest_rate: Decimal, pin: Pin) -> AccountProfile {
    AccountProfile {
        owner: owner.to_string(),
        movements: movements.iter().map(|&m| Decimal::new(m, 0)).collect(),
        interest_rate,
        pin,
    }
}

/// Profiles of the demo accounts, in provisioning order
pub fn demo_profiles() -> Vec<AccountProfile> {
    vec![
        profile(
            "Michael Tran",
            &[200, 450, -400, 3000, -650, -130, 70, 1300],
            Decimal::new(12, 1),
            1111,
        ),
        profile(
            "Rio Le",
            &[5000, 3400, -150, -790, -3210, -1000, 8500, -30],
            Decimal::new(15, 1),
            2222,
        ),
        profile(
            "Tommy Ngo",
            &[200, -200, 340, -300, -20, 50, 400, -460],
            Decimal::new(7, 1),
            3333,
        ),
        profile(
            "Alex Huynh",
            &[430, 1000, 700, 50, 90],
            Decimal::ONE,
            4444,
        ),
    ]
}
