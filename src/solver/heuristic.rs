use crate::config::Weights;
use crate::data::Pos;
use crate::state::State;

// less is better in both

/// Cost used by hill climbing
pub(crate) fn greedy_cost(state: &State, weights: &Weights) -> i64 {
    if state.is_solved() {
        return weights.solved;
    }

    let placed = state.crates_on_target() as i64;
    let unplaced = state.crates().len() as i64 - placed;
    let closest_crate = state
        .crates()
        .iter()
        .map(|&pos| i64::from(state.player_pos().dist(pos)))
        .min()
        .unwrap_or(0);

    weights.distance * goal_dist_sum(state)
        + weights.unplaced_penalty * unplaced
        + weights.player_distance * closest_crate
        - weights.placed_bonus * placed
}

/// Cost used by the hybrid search, `df` scales how much placing a crate is worth
pub(crate) fn hybrid_cost(state: &State, df: i64) -> i64 {
    let targets = state.map().targets().len() as i64;
    if state.is_solved() {
        return -df * targets;
    }

    let placed = state.crates_on_target() as i64;
    let unplaced = state.crates().len() as i64 - placed;
    goal_dist_sum(state) + df * (unplaced - placed)
}

/// Sum of distances from unplaced crates to their closest target
fn goal_dist_sum(state: &State) -> i64 {
    let targets = state.map().targets();
    state
        .crates_off_target()
        .map(|crate_pos| closest_target(crate_pos, targets))
        .sum()
}

fn closest_target(crate_pos: Pos, targets: &[Pos]) -> i64 {
    targets
        .iter()
        .map(|&target| i64::from(crate_pos.dist(target)))
        .min()
        .unwrap_or(0)
}
