use super::RoundEngine;
use crate::types::Player;
use rand::seq::{index, IndexedRandom};
use rand::Rng;

/// Flag exactly `liar_count` distinct players as liars (capped at the table
/// size) and clear the flag on everyone else. Returns the liar seats.
pub fn assign_liars<R: Rng + ?Sized>(
    players: &mut [Player],
    liar_count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let count = liar_count.min(players.len());
    let chosen = index::sample(rng, players.len(), count);

    for player in players.iter_mut() {
        player.is_liar = false;
    }
    for seat in chosen.iter() {
        players[seat].is_liar = true;
    }

    let mut seats = chosen.into_vec();
    seats.sort_unstable();
    seats
}

/// Pick who opens the discussion.
///
/// With `liar_never_goes_first` only innocents are candidates. If every
/// player is a liar there is no candidate and seat 0 is returned, even
/// though that seat is a liar.
pub fn select_starting_player<R: Rng + ?Sized>(
    players: &[Player],
    liar_never_goes_first: bool,
    rng: &mut R,
) -> usize {
    let candidates: Vec<usize> = players
        .iter()
        .enumerate()
        .filter(|(_, p)| !liar_never_goes_first || !p.is_liar)
        .map(|(seat, _)| seat)
        .collect();

    candidates.choose(rng).copied().unwrap_or(0)
}

impl<R: Rng> RoundEngine<R> {
    /// Re-deal the liar role for the current table. Replaces any previous
    /// assignment rather than adding to it.
    pub fn assign_liars(&mut self) -> usize {
        let liar_count = self.state.settings.actual_liar_count(&mut self.rng);
        let seats = assign_liars(&mut self.state.players, liar_count, &mut self.rng);
        tracing::debug!("Assigned liars to seats {:?}", seats);
        seats.len()
    }

    pub fn select_starting_player(&mut self) -> usize {
        let seat = select_starting_player(
            &self.state.players,
            self.state.settings.liar_never_goes_first,
            &mut self.rng,
        );
        self.state.starting_player_index = seat;
        tracing::debug!("Seat {} starts the discussion", seat);
        seat
    }
}
