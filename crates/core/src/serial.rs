//! Watch serial numbers.
//!
//! Serials look like `SN-04718263`: a fixed prefix followed by eight random
//! decimal digits. They are generated when a watch is created without one and
//! regenerated until a candidate is found that no existing watch uses. The
//! insert itself is retried if a concurrent writer claims the same serial
//! first.

use std::future::Future;

use rand::Rng;

use crate::error::CoreError;

/// Prefix shared by every serial number.
pub const SERIAL_PREFIX: &str = "SN-";

/// Number of random digits after the prefix.
pub const SERIAL_DIGITS: usize = 8;

/// Upper bound on regeneration attempts before giving up.
///
/// With 10^8 possible serials, hitting this bound means the uniqueness
/// check itself is broken, not that the space is exhausted.
pub const MAX_SERIAL_ATTEMPTS: usize = 32;

/// Generate a random serial number candidate.
pub fn generate_serial_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut serial = String::with_capacity(SERIAL_PREFIX.len() + SERIAL_DIGITS);
    serial.push_str(SERIAL_PREFIX);
    for _ in 0..SERIAL_DIGITS {
        let digit: u8 = rng.random_range(0..10);
        serial.push(char::from(b'0' + digit));
    }
    serial
}

/// Whether `value` has the `SN-` + 8 digits shape.
pub fn is_valid_serial_number(value: &str) -> bool {
    match value.strip_prefix(SERIAL_PREFIX) {
        Some(digits) => digits.len() == SERIAL_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Validate a client-supplied serial number.
pub fn validate_serial_number(value: &str) -> Result<(), CoreError> {
    if !is_valid_serial_number(value) {
        return Err(CoreError::Validation(format!(
            "serial_number must look like {SERIAL_PREFIX}{}, got '{value}'",
            "0".repeat(SERIAL_DIGITS)
        )));
    }
    Ok(())
}

/// Generate serials until `is_taken` reports a free one.
///
/// Returns `Ok(None)` when every one of [`MAX_SERIAL_ATTEMPTS`] candidates
/// collided. Errors from the lookup are propagated unchanged.
pub async fn allocate_serial_number<F, Fut, E>(mut is_taken: F) -> Result<Option<String>, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    for _ in 0..MAX_SERIAL_ATTEMPTS {
        // The thread-local RNG must not live across the await below.
        let candidate = generate_serial_number(&mut rand::rng());
        if !is_taken(candidate.clone()).await? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Allocate a serial and insert with it, retrying when the insert loses a race.
///
/// `is_taken` screens candidates as in [`allocate_serial_number`]. When
/// `insert` fails and `is_serial_collision` accepts the error, another serial
/// is allocated and the insert repeated. Any other error is returned as is.
/// Returns `Ok(None)` once [`MAX_SERIAL_ATTEMPTS`] inserts have collided or a
/// free candidate could not be found.
pub async fn insert_with_serial<T, E, Taken, TakenFut, Insert, InsertFut, Collision>(
    mut is_taken: Taken,
    mut insert: Insert,
    is_serial_collision: Collision,
) -> Result<Option<T>, E>
where
    Taken: FnMut(String) -> TakenFut,
    TakenFut: Future<Output = Result<bool, E>>,
    Insert: FnMut(String) -> InsertFut,
    InsertFut: Future<Output = Result<T, E>>,
    Collision: Fn(&E) -> bool,
{
    for _ in 0..MAX_SERIAL_ATTEMPTS {
        let Some(serial) = allocate_serial_number(&mut is_taken).await? else {
            return Ok(None);
        };
        match insert(serial).await {
            Ok(row) => return Ok(Some(row)),
            Err(err) if is_serial_collision(&err) => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}
