//! Score accrual and the stepped speed ramp

use super::state::GameState;

/// Add the per-tick score and step the scroll speed on threshold crossings
pub fn advance(state: &mut GameState) {
    state.score += state.tuning.score_per_tick;
    if crossed_threshold(
        state.score,
        state.last_speed_increase_score,
        state.tuning.speed_step_interval,
    ) {
        state.speed += state.px(state.tuning.speed_step);
        state.last_speed_increase_score = state.score;
        log::debug!(
            "Speed up to {:.2} at score {:.1}",
            state.speed,
            state.score
        );
    }
}

/// True when `score` sits in a later interval bucket than `last`
#[inline]
pub fn crossed_threshold(score: f64, last: f64, interval: f64) -> bool {
    interval > 0.0 && (score / interval).floor() > (last / interval).floor()
}
