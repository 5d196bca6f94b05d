use std::io::Write;
use std::ops::RangeInclusive;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shadowword::config::AppConfig;
use shadowword::content::ContentCatalog;
use shadowword::prefs::SavedPreferences;
use shadowword::settings::{GameSettings, MAX_PLAYERS, MIN_PLAYERS};
use shadowword::state::GameSession;
use shadowword::types::*;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Line-based prompt over stdin. `None` means stdin was closed.
struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{} ", prompt);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|l| l.trim().to_string()))
    }

    async fn pause(&mut self, prompt: &str) -> std::io::Result<Option<()>> {
        Ok(self.ask(prompt).await?.map(|_| ()))
    }

    /// Yes/no question; blank input picks `default`
    async fn confirm(&mut self, prompt: &str, default: bool) -> std::io::Result<Option<bool>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let Some(answer) = self.ask(&format!("{} {}", prompt, hint)).await? else {
            return Ok(None);
        };
        Ok(Some(match answer.to_ascii_lowercase().as_str() {
            "" => default,
            a => a.starts_with('y'),
        }))
    }

    /// Number within `range`; blank input picks `default`
    async fn ask_number(
        &mut self,
        prompt: &str,
        range: RangeInclusive<usize>,
        default: usize,
    ) -> std::io::Result<Option<usize>> {
        let prompt = format!("{} ({}-{}) [{}]", prompt, range.start(), range.end(), default);
        loop {
            let Some(answer) = self.ask(&prompt).await? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match answer.parse::<usize>() {
                Ok(n) if range.contains(&n) => return Ok(Some(n)),
                _ => println!("Enter a number between {} and {}.", range.start(), range.end()),
            }
        }
    }

    /// 1-based choice from a numbered list
    async fn choose(&mut self, prompt: &str, len: usize) -> std::io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.ask(prompt).await? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=len).contains(&n) => return Ok(Some(n - 1)),
                _ => println!("Pick a number between 1 and {}.", len),
            }
        }
    }
}

fn clear_screen() {
    // Push the previous card out of view before the device changes hands
    print!("\x1B[2J\x1B[H");
}

fn heading(phase: GamePhase) {
    println!();
    println!("== {} ==", phase.display_title());
    println!("{}", phase.instruction());
}

/// Parse a list of 1-based picks such as `1 3` or `2,4` into indices.
/// `None` if any entry is not a number in range.
fn parse_picks(input: &str, len: usize) -> Option<Vec<usize>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => Some(n - 1),
            _ => None,
        })
        .collect()
}

async fn ask_roster(
    term: &mut Terminal,
    prefs: &SavedPreferences,
    count: usize,
) -> std::io::Result<Option<Vec<Player>>> {
    if prefs.player_names.len() == count {
        let names = prefs.player_names.join(", ");
        match term.confirm(&format!("Play with {}?", names), true).await? {
            Some(true) => return Ok(Some(prefs.roster())),
            Some(false) => {}
            None => return Ok(None),
        }
    }

    let mut players = default_players(count);
    for (seat, player) in players.iter_mut().enumerate() {
        if let Some(saved) = prefs.player_names.get(seat) {
            player.name = saved.clone();
        }
        let Some(name) = term.ask(&format!("Name for seat {} [{}]:", seat + 1, player.name)).await?
        else {
            return Ok(None);
        };
        if !name.is_empty() {
            player.name = name;
        }
    }
    Ok(Some(players))
}

/// Toggle which categories are played and which are favorites
async fn pick_categories(
    term: &mut Terminal,
    prefs: &mut SavedPreferences,
    settings: &mut GameSettings,
    category_names: &[CategoryName],
) -> std::io::Result<Option<()>> {
    loop {
        println!("Categories (* = favorite):");
        for (i, name) in category_names.iter().enumerate() {
            let selected = settings.selected_categories.is_empty()
                || settings.selected_categories.contains(name);
            let favorite = if prefs.favorite_categories.contains(name) { " *" } else { "" };
            println!(
                "  {}. [{}] {}{}",
                i + 1,
                if selected { "x" } else { " " },
                name,
                favorite
            );
        }

        let Some(answer) = term
            .ask("Toggle by number, 'all' for every category, 'f <numbers>' to mark favorites, Enter when done:")
            .await?
        else {
            return Ok(None);
        };

        match answer.to_ascii_lowercase().as_str() {
            "" => return Ok(Some(())),
            "a" | "all" => settings.selected_categories.clear(),
            a if a.starts_with('f') => match parse_picks(&a[1..], category_names.len()) {
                Some(picks) => {
                    for i in picks {
                        prefs.toggle_favorite(&category_names[i]);
                    }
                }
                None => println!("Pick numbers between 1 and {}.", category_names.len()),
            },
            a => match parse_picks(a, category_names.len()) {
                Some(picks) => {
                    // An empty selection means all, so start from the full list
                    if settings.selected_categories.is_empty() {
                        settings.selected_categories = category_names.iter().cloned().collect();
                    }
                    for i in picks {
                        let name = &category_names[i];
                        if !settings.selected_categories.remove(name) {
                            settings.selected_categories.insert(name.clone());
                        }
                    }
                }
                None => println!("Pick numbers between 1 and {}.", category_names.len()),
            },
        }
    }
}

async fn ask_settings(
    term: &mut Terminal,
    prefs: &mut SavedPreferences,
    category_names: &[CategoryName],
) -> std::io::Result<Option<GameSettings>> {
    let mut settings = prefs.settings.clone();
    if settings.selected_categories.is_empty() {
        // Favorites the current catalog no longer has are skipped
        settings.selected_categories = prefs
            .favorite_categories
            .iter()
            .filter(|name| category_names.contains(name))
            .cloned()
            .collect();
    }

    let Some(count) = term
        .ask_number(
            "How many players?",
            MIN_PLAYERS..=MAX_PLAYERS,
            settings.player_count.clamp(MIN_PLAYERS, MAX_PLAYERS),
        )
        .await?
    else {
        return Ok(None);
    };
    settings.player_count = count;
    settings.adjust_liar_count();

    let Some(liar_mode) = term
        .ask(&format!(
            "Liar count, fixed or random [{:?}]:",
            settings.liar_count_mode
        ))
        .await?
    else {
        return Ok(None);
    };
    match liar_mode.to_ascii_lowercase().as_str() {
        "fixed" | "f" => settings.liar_count_mode = LiarCountMode::Fixed,
        "random" | "r" => settings.liar_count_mode = LiarCountMode::Random,
        _ => {}
    }
    match settings.liar_count_mode {
        LiarCountMode::Fixed => {
            let Some(liars) = term
                .ask_number(
                    "How many liars?",
                    1..=settings.max_liar_count(),
                    settings.fixed_liar_count.max(1),
                )
                .await?
            else {
                return Ok(None);
            };
            settings.fixed_liar_count = liars;
        }
        LiarCountMode::Random => {
            let range = settings.recommended_liar_range();
            println!(
                "Each round deals between {} and {} liars.",
                range.start(),
                range.end()
            );
        }
    }

    let Some(mode) = term
        .ask(&format!("Mode, word or question [{:?}]:", settings.game_mode))
        .await?
    else {
        return Ok(None);
    };
    match mode.to_ascii_lowercase().as_str() {
        "word" | "w" => settings.game_mode = GameMode::Word,
        "question" | "q" => settings.game_mode = GameMode::Question,
        _ => {}
    }

    let Some(difficulty) = term
        .ask(&format!(
            "Difficulty, easy/medium/hard [{:?}]:",
            settings.difficulty
        ))
        .await?
    else {
        return Ok(None);
    };
    if !difficulty.is_empty() {
        match difficulty.parse() {
            Ok(d) => settings.difficulty = d,
            Err(e) => println!("Keeping {:?}: {}", settings.difficulty, e),
        }
    }

    if settings.game_mode == GameMode::Word {
        let Some(show_category) = term
            .confirm("Show the category to the liar?", settings.show_category_to_liar)
            .await?
        else {
            return Ok(None);
        };
        settings.show_category_to_liar = show_category;

        let Some(show_hint) = term
            .confirm("Show the hint to the liar?", settings.show_hint_to_liar)
            .await?
        else {
            return Ok(None);
        };
        settings.show_hint_to_liar = show_hint;
    }

    let Some(never_first) = term
        .confirm("Keep liars from going first?", settings.liar_never_goes_first)
        .await?
    else {
        return Ok(None);
    };
    settings.liar_never_goes_first = never_first;

    if pick_categories(term, prefs, &mut settings, category_names)
        .await?
        .is_none()
    {
        return Ok(None);
    }

    Ok(Some(settings))
}

async fn play_reveal(term: &mut Terminal, session: &GameSession) -> Result<Option<()>, BoxError> {
    heading(GamePhase::RoleReveal);
    while let Some(player) = session.current_reveal_player().await {
        clear_screen();
        if term
            .pause(&format!("Pass the device to {}. Press Enter to see your role.", player.name))
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let card = session.reveal_content_for(&player).await;
        println!();
        println!("  {}", card.content);
        if let Some(subtitle) = &card.subtitle {
            println!("  {}", subtitle);
        }
        println!();
        if term.pause("Press Enter to hide it.").await?.is_none() {
            return Ok(None);
        }
        session.mark_current_player_revealed().await?;
    }
    clear_screen();
    Ok(Some(()))
}

async fn play_voting(term: &mut Terminal, session: &GameSession) -> Result<Option<()>, BoxError> {
    heading(GamePhase::Voting);
    while let Some(voter) = session.current_voting_player().await {
        let targets = session.vote_targets().await;
        println!();
        println!("{}, who is the liar?", voter.name);
        for (i, target) in targets.iter().enumerate() {
            println!("  {}. {}", i + 1, target.name);
        }
        let Some(pick) = term.choose("Your vote:", targets.len()).await? else {
            return Ok(None);
        };
        session.record_vote(&targets[pick].id).await?;
    }
    Ok(Some(()))
}

async fn play_liar_guess(
    term: &mut Terminal,
    session: &GameSession,
) -> Result<Option<()>, BoxError> {
    session.transition_phase(GamePhase::LiarGuess).await?;
    heading(GamePhase::LiarGuess);

    let options = session.liar_guess_options().await;
    println!("Which word was the secret?");
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    let Some(pick) = term.choose("Liar's guess:", options.len()).await? else {
        return Ok(None);
    };
    session.process_liar_guess(&options[pick]).await?;

    if session.liar_guess_correct().await == Some(true) {
        println!("Correct!");
    } else {
        println!("Wrong, it was {}.", session.secret_word().await);
    }
    Ok(Some(()))
}

/// One round from role reveal to game over. `None` when stdin closed mid-round.
async fn play_round(term: &mut Terminal, session: &GameSession) -> Result<Option<()>, BoxError> {
    if play_reveal(term, session).await?.is_none() {
        return Ok(None);
    }

    session.transition_phase(GamePhase::Discussion).await?;
    heading(GamePhase::Discussion);
    if let Some(starter) = session.starting_player().await {
        println!("{} goes first.", starter.name);
    }
    if term.pause("Press Enter when you are ready to vote.").await?.is_none() {
        return Ok(None);
    }

    session.transition_phase(GamePhase::Voting).await?;
    if play_voting(term, session).await?.is_none() {
        return Ok(None);
    }

    let result = session.calculate_results().await?;
    heading(GamePhase::Results);
    println!("{}", result.title());
    println!("{}", result.subtitle());

    if session.should_offer_liar_guess().await && play_liar_guess(term, session).await?.is_none() {
        return Ok(None);
    }

    session.transition_phase(GamePhase::GameOver).await?;
    heading(GamePhase::GameOver);
    if let Some(outcome) = session.outcome().await {
        println!("{}", outcome.title());
        println!("{}", outcome.subtitle());
    }

    let state = session.snapshot().await;
    match state.settings.game_mode {
        GameMode::Word => println!("The word was {} ({}).", state.secret_word(), state.category_name()),
        GameMode::Question => {
            println!("The question was: {}", state.main_question());
            println!("The liar's question was: {}", state.liar_question());
        }
    }
    Ok(Some(()))
}

async fn run(config: AppConfig) -> Result<(), BoxError> {
    let mut prefs = match SavedPreferences::load(&config.prefs_path).await {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!("Failed to load preferences: {}. Starting fresh.", e);
            SavedPreferences::default()
        }
    };
    let catalog = ContentCatalog::load_or_builtin(config.content_path.as_deref());

    let session = match config.seed {
        Some(seed) => GameSession::with_seed(catalog, seed),
        None => GameSession::new(catalog),
    };

    let mut snapshots = session.subscribe();
    tokio::spawn(async move {
        loop {
            match snapshots.recv().await {
                Ok(state) => tracing::debug!(
                    "Snapshot: phase {:?}, {} revealed, {} voted",
                    state.phase,
                    state.revealed_count(),
                    state.voted_count()
                ),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    tracing::debug!("Snapshot logger skipped {} snapshots", n);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut term = Terminal::new();
    println!("ShadowWord: one of you does not know the secret.");
    let category_names = session.category_names().await;

    'setup: loop {
        heading(GamePhase::Setup);
        let Some(settings) = ask_settings(&mut term, &mut prefs, &category_names).await? else {
            break;
        };

        session.transition_phase(GamePhase::PlayerNames).await?;
        heading(GamePhase::PlayerNames);
        let Some(players) = ask_roster(&mut term, &prefs, settings.player_count).await? else {
            break;
        };

        if let Err(e) = session.start_round_with_fallback(settings, players).await {
            println!("Could not start the round: {}", e);
            session.transition_phase(GamePhase::Setup).await?;
            continue;
        }

        loop {
            if play_round(&mut term, &session).await?.is_none() {
                break 'setup;
            }

            prefs = SavedPreferences {
                favorite_categories: prefs.favorite_categories.clone(),
                ..SavedPreferences::from_round(&session.settings().await, &session.players().await)
            };
            if let Err(e) = prefs.save(&config.prefs_path).await {
                tracing::warn!("Failed to save preferences: {}", e);
            }

            match term.confirm("Play again with the same table?", true).await? {
                Some(true) => {
                    if let Err(e) = session.play_again().await {
                        tracing::warn!("Play again refused: {}", e);
                        println!("Could not deal a new round: {}", e);
                        session.transition_phase(GamePhase::Setup).await?;
                        continue 'setup;
                    }
                }
                Some(false) => match term.confirm("Change settings and keep playing?", false).await? {
                    Some(true) => {
                        session.transition_phase(GamePhase::Setup).await?;
                        continue 'setup;
                    }
                    _ => break 'setup,
                },
                None => break 'setup,
            }
        }
    }

    if session.phase().await == GamePhase::GameOver {
        session.transition_phase(GamePhase::Setup).await?;
    }
    println!("Thanks for playing!");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Logs go to stderr so they stay out of the game text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shadowword=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting ShadowWord...");

    let config = AppConfig::from_env();
    if let Err(e) = run(config).await {
        tracing::error!("Game stopped: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_picks() {
        assert_eq!(parse_picks("1 3", 5), Some(vec![0, 2]));
        assert_eq!(parse_picks(" 2,4 ", 5), Some(vec![1, 3]));
        assert_eq!(parse_picks("", 5), Some(vec![]));
        assert_eq!(parse_picks("0", 5), None);
        assert_eq!(parse_picks("6", 5), None);
        assert_eq!(parse_picks("two", 5), None);
    }
}
