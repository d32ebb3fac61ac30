// src/bin/poker_dev_cli.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use poker_hand_engine::api::build_hand_view;
use poker_hand_engine::domain::card::cards_to_string;
use poker_hand_engine::domain::chips::Chips;
use poker_hand_engine::domain::hand::HandRecord;
use poker_hand_engine::domain::table::{SeatedPlayer, TableConfig, TableStakes};
use poker_hand_engine::domain::SeatIndex;
use poker_hand_engine::engine::{
    GameSession, HandStatus, PassivePolicy, PlayerActionKind, RandomPolicy, RandomSource,
};
use poker_hand_engine::infra::{DeterministicRng, InMemoryHandHistory, SystemRng};

/// Dev-CLI: прогнать несколько раздач за одним столом.
#[derive(Parser, Debug)]
#[command(name = "poker_dev_cli", about = "Одностоловый покерный движок: dev-прогон раздач")]
struct Args {
    /// Сколько игроков за столом (2–9).
    #[arg(long, default_value_t = 3)]
    players: u8,

    /// Сколько раздач сыграть.
    #[arg(long, default_value_t = 1)]
    hands: u32,

    /// Стартовый стек (перекрывает конфиг).
    #[arg(long)]
    stack: Option<u64>,

    /// Малый блайнд (перекрывает конфиг).
    #[arg(long)]
    small_blind: Option<u64>,

    /// Большой блайнд (перекрывает конфиг).
    #[arg(long)]
    big_blind: Option<u64>,

    /// Seed для колоды и ботов – одинаковый seed даёт одинаковые раздачи.
    #[arg(long)]
    seed: Option<u64>,

    /// Место 0 – человек, действия читаются из stdin.
    #[arg(long)]
    human: bool,

    /// Как играют боты.
    #[arg(long, value_enum, default_value_t = BotKind::Passive)]
    bots: BotKind,

    /// JSON-конфиг стола (`TableConfig`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Печатать записи раздач в JSON (по одной на строку).
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BotKind {
    Passive,
    Random,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    match args.seed {
        Some(seed) => run(&args, config, DeterministicRng::from_seed(seed)),
        None => run(&args, config, SystemRng),
    }
}

fn load_config(args: &Args) -> Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("не удалось прочитать {}", path.display()))?;
            TableConfig::from_json_str(&raw)?
        }
        None => TableConfig::default(),
    };

    if let Some(bb) = args.big_blind {
        config.stakes = TableStakes::from_big_blind(Chips(bb));
    }
    if let Some(sb) = args.small_blind {
        config.stakes.small_blind = Chips(sb);
    }
    if let Some(stack) = args.stack {
        config.default_stack = Chips(stack);
    }
    config.validate()?;

    if args.players < 2 || args.players > config.max_seats {
        bail!("игроков должно быть от 2 до {}", config.max_seats);
    }
    Ok(config)
}

fn run<R: RandomSource>(args: &Args, config: TableConfig, rng: R) -> Result<()> {
    let default_stack = config.default_stack;
    let mut session = GameSession::new(config, rng, InMemoryHandHistory::new())?;

    let first_bot: SeatIndex = if args.human { 1 } else { 0 };
    for seat in first_bot..args.players {
        match args.bots {
            BotKind::Passive => session.set_policy(seat, PassivePolicy),
            BotKind::Random => {
                let seed = args.seed.unwrap_or_default().wrapping_add(seat as u64);
                session.set_policy(seat, RandomPolicy::from_seed(seed));
            }
        }
    }

    let mut players: Vec<SeatedPlayer> = (0..args.players)
        .map(|i| SeatedPlayer::new(format!("P{}", i + 1), default_stack))
        .collect();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for n in 0..args.hands {
        for p in players.iter_mut().filter(|p| p.stack.is_zero()) {
            info!(player = %p.name, "пустой стек, докупка");
            p.stack = default_stack;
        }

        let mut status = session.start_hand(&players, None)?;

        while status == HandStatus::Ongoing {
            let Some(seat) = session.hand().and_then(|h| h.current_player) else {
                bail!("раздача идёт, но никто не ходит");
            };
            let kind = prompt_human(&session, seat, &mut lines)?;
            match session.apply_action(seat, kind) {
                Ok(next) => status = next,
                Err(e) if e.is_user_error() => println!("  ! {e}"),
                Err(e) => return Err(e.into()),
            }
        }

        let HandStatus::Finished(record) = status else {
            continue;
        };
        print_record(n + 1, &record, args.json)?;

        if let Some(hand) = session.hand() {
            for (seated, p) in players.iter_mut().zip(&hand.players) {
                seated.stack = p.stack;
            }
        }
    }

    Ok(())
}

fn prompt_human<R: RandomSource, L: Iterator<Item = io::Result<String>>>(
    session: &GameSession<R, InMemoryHandHistory>,
    seat: SeatIndex,
    lines: &mut L,
) -> Result<PlayerActionKind> {
    loop {
        if let Some(hand) = session.hand() {
            let view = build_hand_view(hand, Some(seat));
            let me = &view.players[seat as usize];
            println!(
                "[{:?}] борд: {} | банк: {} | ставка: {} | ваш стек: {} | ваши карты: {}",
                view.street,
                cards_to_string(&view.community_cards),
                view.pot,
                view.current_bet,
                me.stack,
                me.hole_cards.as_deref().map(cards_to_string).unwrap_or_default(),
            );
        }

        let legal: Vec<String> = session
            .legal_actions(seat)
            .iter()
            .map(PlayerActionKind::code)
            .collect();
        print!("ход (f / x / c / b<n> / r<n> / allin), можно: {}> ", legal.join(" "));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            bail!("stdin закрыт");
        };
        match line?.trim().parse::<PlayerActionKind>() {
            Ok(kind) => return Ok(kind),
            Err(e) => println!("  ! {e}"),
        }
    }
}

fn print_record(n: u32, record: &HandRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(record)?);
        return Ok(());
    }

    println!(
        "#{n} (id={}) банк {} | борд: {} | действия: {}",
        record.id,
        record.total_pot,
        record.board_cards.join(" "),
        record.action_sequence.join(" "),
    );
    for name in &record.player_names {
        let delta = record.payoffs.get(name).copied().unwrap_or_default();
        let cards = record.player_cards.get(name).map(String::as_str).unwrap_or("");
        println!("  {name:<4} {cards:<6} {delta:+}");
    }
    Ok(())
}
