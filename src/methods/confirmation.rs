use crate::POOL;
use diesel::prelude::*;
use rand::Rng;

/// 8-character confirmation code printed on the customer's ticket.
pub fn generate_unique_check_in_confirmation() -> String {
    // Digits 0-9 and uppercase A-Z, ambiguous characters included on purpose
    // because the code is scanned, not typed.
    let charset: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::rng();

    loop {
        let confirmation: String = (0..8)
            .map(|_| {
                let idx = rng.random_range(0..charset.len());
                charset[idx] as char
            })
            .collect();

        // If there's an error performing the query, treat it as "exists = true" so we retry.
        let exists = {
            let mut conn = POOL.clone().get().expect("Failed to get DB connection");
            diesel::select(diesel::dsl::exists(
                crate::schema::check_ins::table
                    .filter(crate::schema::check_ins::confirmation.eq(&confirmation)),
            ))
            .get_result::<bool>(&mut conn)
            .unwrap_or_else(|e| {
                eprintln!("Database error checking check-in confirmation: {:?}", e);
                true
            })
        };

        if !exists {
            return confirmation;
        }
    }
}
