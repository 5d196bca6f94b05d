use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Number of choices the caught liar picks from
pub const GUESS_OPTION_COUNT: usize = 4;

/// Build the liar's last-chance choices: the secret word plus up to three
/// other words from `all_words`, padded with placeholders when the catalog
/// is too small, in random order.
///
/// Words are compared case-insensitively, matching how the guess is judged,
/// so no distractor can collide with the secret word.
pub fn generate_liar_guess_options<R: Rng + ?Sized>(
    correct_word: &str,
    all_words: &[&str],
    rng: &mut R,
) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::from([correct_word.to_lowercase()]);

    let mut distractors: Vec<&str> = all_words
        .iter()
        .copied()
        .filter(|w| seen.insert(w.to_lowercase()))
        .collect();
    distractors.shuffle(rng);

    let mut options = vec![correct_word.to_string()];
    options.extend(
        distractors
            .into_iter()
            .take(GUESS_OPTION_COUNT - 1)
            .map(str::to_string),
    );

    let mut n = options.len();
    while options.len() < GUESS_OPTION_COUNT {
        let placeholder = format!("Unknown {}", n);
        n += 1;
        if seen.insert(placeholder.to_lowercase()) {
            options.push(placeholder);
        }
    }

    options.shuffle(rng);
    options
}
