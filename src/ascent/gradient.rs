//! Discrete gradient computation.

use crate::error::EvaluationError;
use crate::model::CompiledModel;

/// Per-variable ascent scores at `values`.
///
/// Score `i` is `objective(values with x_i + 1) - objective(values with
/// max(0, x_i - 1))`, every other variable held fixed. Only the sign is
/// used by the ascent loop.
///
/// The probe is always a unit change, independent of the step size.
pub fn discrete_gradient(
    problem: &CompiledModel,
    values: &[i64],
) -> Result<Vec<f64>, EvaluationError> {
    let mut probe = values.to_vec();
    let mut scores = Vec::with_capacity(values.len());

    for (i, &original) in values.iter().enumerate() {
        probe[i] = original.saturating_add(1);
        let plus = problem.objective(&probe)?;

        probe[i] = original.saturating_sub(1).max(0);
        let minus = problem.objective(&probe)?;

        probe[i] = original;
        scores.push(plus - minus);
    }

    Ok(scores)
}

/// Best neighbour found by sweeping all sign vectors.
///
/// Sign vectors are visited in lexicographic order over `(-1, 0, +1)`
/// with the last variable changing fastest. Each candidate is the
/// current reference shifted by `step * signs` and clamped at 0. A
/// feasible candidate with a strictly larger objective becomes the new
/// reference, and later sign vectors are applied to it.
///
/// Returns the final reference, which equals `values` when nothing
/// improved. Visits `3^n` candidates.
pub fn best_neighbor(
    problem: &CompiledModel,
    values: &[i64],
    step: i64,
) -> Result<Vec<i64>, EvaluationError> {
    let n = values.len();
    let mut reference = values.to_vec();
    let mut reference_value = problem.objective(&reference)?;
    let mut candidate = vec![0i64; n];

    // Odometer over {-1, 0, +1}^n, digits 0..=2.
    let mut digits = vec![0u8; n];
    loop {
        for i in 0..n {
            let delta = (i64::from(digits[i]) - 1) * step;
            candidate[i] = reference[i].saturating_add(delta).max(0);
        }

        if problem.is_feasible(&candidate)? {
            let value = problem.objective(&candidate)?;
            if value > reference_value {
                reference.copy_from_slice(&candidate);
                reference_value = value;
            }
        }

        if !advance(&mut digits) {
            break;
        }
    }

    Ok(reference)
}

/// Moves the odometer forward; false once every vector has been visited.
fn advance(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d < 2 {
            *d += 1;
            return true;
        }
        *d = 0;
    }
    false
}
