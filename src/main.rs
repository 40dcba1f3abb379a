//! Fitlog - Fitness Tracking Core
//!
//! Command-line front end for the fitlog library. Stands in for the
//! presentation layer: each subcommand names the acting user by email,
//! which a real deployment would resolve from its session handling.

use anyhow::{bail, Context};
use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitlog::storage::config;
use fitlog::users::types::User;
use fitlog::workouts::types::ExerciseInput;
use fitlog::{
    Database, FriendGraph, GoalTracker, UserDirectory, WeeklyLeaderboard, WorkoutLog,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fitlog v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config().context("failed to load configuration")?;
    let mut db = Database::open(&config.database_path).context("failed to open database")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "register" => {
            let name = arg(&args, 1, "register <name> <email> <weight-kg>")?;
            let email = arg(&args, 2, "register <name> <email> <weight-kg>")?;
            let weight: f32 = arg(&args, 3, "register <name> <email> <weight-kg>")?
                .parse()
                .context("weight must be a number")?;

            let id = UserDirectory::new(db.connection()).register(name, email, weight)?;
            println!("Registered {email} ({id})");
        }
        "add-friend" => {
            let user = acting_user(&db, &args)?;
            let friend_email = arg(&args, 2, "add-friend <email> <friend-email>")?.to_string();

            FriendGraph::new(&mut db).add_friend(user.id, &friend_email)?;
            println!("{} and {} are now friends", user.email, friend_email);
        }
        "remove-friend" => {
            let user = acting_user(&db, &args)?;
            let friend_email = arg(&args, 2, "remove-friend <email> <friend-email>")?.to_string();

            FriendGraph::new(&mut db).remove_friend(user.id, &friend_email)?;
            println!("{} and {} are no longer friends", user.email, friend_email);
        }
        "friends" => {
            let user = acting_user(&db, &args)?;

            let friends = FriendGraph::new(&mut db).list_friends(user.id)?;
            if friends.is_empty() {
                println!("{} has no friends yet", user.email);
            }
            for friend in friends {
                println!("{}  <{}>", friend.name, friend.email);
            }
        }
        "log-workout" => {
            let usage = "log-workout <email> <date> <minutes> <name>:<reps>:<sets>:<weight-kg>...";
            let user = acting_user(&db, &args)?;
            let date = parse_cli_date(arg(&args, 2, usage)?)?;
            let minutes: u32 = arg(&args, 3, usage)?
                .parse()
                .context("minutes must be a number")?;

            let exercises: Vec<ExerciseInput> = args[4..]
                .iter()
                .map(|raw| parse_exercise(raw))
                .collect::<anyhow::Result<_>>()?;

            let id = WorkoutLog::new(&mut db).log_workout(user.id, date, minutes, &exercises)?;
            println!("Logged workout {id} ({minutes} min)");
        }
        "history" => {
            let user = acting_user(&db, &args)?;

            for workout in WorkoutLog::new(&mut db).list_workouts(user.id)? {
                println!("{}  {:>4} min", workout.date, workout.duration_minutes);
            }
        }
        "set-goal" => {
            let usage = "set-goal <email> <target-value> <description>...";
            let user = acting_user(&db, &args)?;
            let target: f64 = arg(&args, 2, usage)?
                .parse()
                .context("target value must be a number")?;
            let description = args[3..].join(" ");

            let id = GoalTracker::new(db.connection()).set_goal(user.id, &description, target)?;
            println!("Set goal {id}");
        }
        "goals" => {
            let user = acting_user(&db, &args)?;

            for goal in GoalTracker::new(db.connection()).list_goals(user.id)? {
                let status = if goal.completed { "done" } else { "open" };
                println!("[{status}] {}  (target {})  {}", goal.description, goal.target_value, goal.id);
            }
        }
        "complete-goal" => {
            let user = acting_user(&db, &args)?;
            let goal_id = arg(&args, 2, "complete-goal <email> <goal-id>")?
                .parse()
                .context("goal id must be a UUID")?;

            GoalTracker::new(db.connection()).complete_goal(user.id, goal_id)?;
            println!("Goal completed");
        }
        "leaderboard" => {
            let user = acting_user(&db, &args)?;

            println!("This week:");
            for entry in WeeklyLeaderboard::new(db.connection()).weekly_totals(user.id)? {
                let marker = if entry.is_current_user { "*" } else { " " };
                println!(
                    "{:>3}. {marker} {:<20} {:>4} min",
                    entry.rank, entry.name, entry.total_minutes
                );
            }
        }
        other => {
            print_usage();
            bail!("unknown command: {other}");
        }
    }

    Ok(())
}

/// Resolve the acting user from the first positional argument (an email).
fn acting_user(db: &Database, args: &[String]) -> anyhow::Result<User> {
    let email = arg(args, 1, "<command> <email> ...")?;
    UserDirectory::new(db.connection())
        .find_by_email(email)?
        .with_context(|| format!("no user registered under {email}"))
}

fn arg<'a>(args: &'a [String], index: usize, usage: &str) -> anyhow::Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .with_context(|| format!("usage: fitlog {usage}"))
}

fn parse_cli_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").context("date must be YYYY-MM-DD")
}

/// Parse an exercise argument of the form `<name>:<reps>:<sets>:<weight-kg>`.
fn parse_exercise(raw: &str) -> anyhow::Result<ExerciseInput> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 4 {
        bail!("exercise must be <name>:<reps>:<sets>:<weight-kg>, got '{raw}'");
    }

    Ok(ExerciseInput {
        name: parts[0].to_string(),
        reps: parts[1].parse().context("reps must be a number")?,
        sets: parts[2].parse().context("sets must be a number")?,
        weight_kg: parts[3].parse().context("weight must be a number")?,
    })
}

fn print_usage() {
    println!("fitlog - fitness tracking core");
    println!();
    println!("Usage: fitlog <command> [args]");
    println!();
    println!("Commands:");
    println!("  register <name> <email> <weight-kg>");
    println!("  add-friend <email> <friend-email>");
    println!("  remove-friend <email> <friend-email>");
    println!("  friends <email>");
    println!("  log-workout <email> <date> <minutes> <name>:<reps>:<sets>:<weight-kg>...");
    println!("  history <email>");
    println!("  set-goal <email> <target-value> <description>...");
    println!("  goals <email>");
    println!("  complete-goal <email> <goal-id>");
    println!("  leaderboard <email>");
}
