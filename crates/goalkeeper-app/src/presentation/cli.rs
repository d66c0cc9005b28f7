use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use crate::application::commands::*;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use goalkeeper_domain::goal::GoalPeriod;
use goalkeeper_domain::user::{SocialProfile, SocialProvider};

#[derive(Debug, Parser)]
#[command(name = "goalkeeper")]
#[command(about = "Goal tracking with streaks, rewards, a mascot shop and a community feed")]
#[command(version)]
pub struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Accounts and profiles
    #[command(subcommand)]
    User(UserCommand),
    /// Goals, check-ins and streaks
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Mascot and accessory shop
    #[command(subcommand)]
    Shop(ShopCommand),
    /// Community posts and reactions
    #[command(subcommand)]
    Post(PostCommand),
}

#[derive(Debug, Args)]
pub struct UserArg {
    /// Acting user id
    #[arg(long)]
    pub user: String,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Log in with a verified social identity, registering on first login
    Login {
        /// kakao or google
        #[arg(long)]
        provider: String,
        /// Provider-side account id
        #[arg(long)]
        subject: String,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Profile(UserArg),
    Update {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete the account and everything it owns
    Withdraw(UserArg),
}

#[derive(Debug, Subcommand)]
pub enum GoalCommand {
    List(UserArg),
    Get {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        goal: String,
    },
    Create {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        /// daily, weekly or yearly
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        memo: Option<String>,
        /// RFC 3339 timestamp or YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    Update {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        goal: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        period: Option<String>,
        /// Empty string clears the memo
        #[arg(long)]
        memo: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
        #[arg(long)]
        due: Option<String>,
    },
    Delete {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        goal: String,
    },
    /// Check in on a goal for today
    Check {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        goal: String,
    },
    Streak(UserArg),
    Calendar {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
    History {
        #[command(flatten)]
        user: UserArg,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum ShopCommand {
    Mascots,
    Accessories,
    MyMascots(UserArg),
    MyAccessories(UserArg),
    /// Active mascot and accessories
    Equipped(UserArg),
    BuyMascot {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        mascot: String,
    },
    BuyAccessory {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        accessory: String,
    },
    EquipMascot {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        mascot: String,
    },
    EquipAccessory {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        accessory: String,
    },
    UnequipAccessory {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        accessory: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    List {
        /// Viewer id, fills in `my_reaction`
        #[arg(long)]
        user: Option<String>,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        post: String,
    },
    Create {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Image file to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Update {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        post: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        post: String,
    },
    /// Toggle an emoji reaction
    React {
        #[command(flatten)]
        user: UserArg,
        #[arg(long)]
        post: String,
        #[arg(long)]
        emoji: String,
    },
}

fn to_json<T: Serialize>(value: T) -> Result<Value, CommandError> {
    Ok(serde_json::to_value(value)?)
}

fn parse_period(raw: Option<String>) -> Result<Option<GoalPeriod>, CommandError> {
    Ok(raw.map(|p| p.parse::<GoalPeriod>()).transpose()?)
}

/// Accepts a full timestamp or a bare date taken as midnight UTC
fn parse_due_date(raw: Option<String>) -> Result<Option<DateTime<Utc>>, CommandError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| CommandError::validation(format!("Invalid due date: {raw}")))
}

async fn read_image(path: Option<PathBuf>) -> Result<Option<ImageUpload>, CommandError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let bytes = tokio::fs::read(&path).await?;
    Ok(Some(ImageUpload {
        filename: file_name(&path),
        bytes,
    }))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

/// Execute one command against the wired application
pub async fn run(command: Commands, state: &AppState) -> Result<Value, CommandError> {
    match command {
        Commands::User(cmd) => run_user(cmd, state).await,
        Commands::Goal(cmd) => run_goal(cmd, state).await,
        Commands::Shop(cmd) => run_shop(cmd, state).await,
        Commands::Post(cmd) => run_post(cmd, state).await,
    }
}

async fn run_user(cmd: UserCommand, state: &AppState) -> Result<Value, CommandError> {
    let handlers = &state.command_handlers;

    match cmd {
        UserCommand::Login {
            provider,
            subject,
            nickname,
            email,
        } => {
            let provider = provider.parse::<SocialProvider>()?;
            let profile = SocialProfile::new(provider, subject, nickname, email)?;
            to_json(
                handlers
                    .social_login
                    .handle(SocialLoginCommand { profile })
                    .await?,
            )
        }
        UserCommand::Profile(UserArg { user }) => {
            to_json(state.queries.user.get_profile(&user).await?)
        }
        UserCommand::Update {
            user,
            nickname,
            email,
        } => to_json(
            handlers
                .update_profile
                .handle(UpdateProfileCommand {
                    user_id: user.user,
                    nickname,
                    email,
                })
                .await?,
        ),
        UserCommand::Withdraw(UserArg { user }) => {
            handlers
                .withdraw
                .handle(WithdrawCommand {
                    user_id: user.clone(),
                })
                .await?;
            Ok(json!({ "user_id": user, "deleted": true }))
        }
    }
}

async fn run_goal(cmd: GoalCommand, state: &AppState) -> Result<Value, CommandError> {
    let handlers = &state.command_handlers;

    match cmd {
        GoalCommand::List(UserArg { user }) => {
            to_json(state.queries.goal.list_goals(&user).await?)
        }
        GoalCommand::Get { user, goal } => {
            to_json(state.queries.goal.get_goal(&user.user, &goal).await?)
        }
        GoalCommand::Create {
            user,
            title,
            category,
            period,
            memo,
            due,
        } => to_json(
            handlers
                .create_goal
                .handle(CreateGoalCommand {
                    user_id: user.user,
                    title,
                    category,
                    period: parse_period(period)?,
                    memo,
                    due_date: parse_due_date(due)?,
                })
                .await?,
        ),
        GoalCommand::Update {
            user,
            goal,
            title,
            category,
            period,
            memo,
            completed,
            due,
        } => to_json(
            handlers
                .update_goal
                .handle(UpdateGoalCommand {
                    user_id: user.user,
                    goal_id: goal,
                    title,
                    category,
                    period: parse_period(period)?,
                    memo,
                    is_completed: completed,
                    due_date: parse_due_date(due)?,
                })
                .await?,
        ),
        GoalCommand::Delete { user, goal } => {
            handlers
                .delete_goal
                .handle(DeleteGoalCommand {
                    user_id: user.user,
                    goal_id: goal.clone(),
                })
                .await?;
            Ok(json!({ "goal_id": goal, "deleted": true }))
        }
        GoalCommand::Check { user, goal } => to_json(
            handlers
                .check_goal
                .handle(CheckGoalCommand {
                    user_id: user.user,
                    goal_id: goal,
                })
                .await?,
        ),
        GoalCommand::Streak(UserArg { user }) => {
            to_json(state.queries.streak.streak_summary(&user).await?)
        }
        GoalCommand::Calendar { user, year, month } => {
            to_json(state.queries.streak.calendar(&user.user, year, month).await?)
        }
        GoalCommand::History { user, limit } => {
            to_json(state.queries.streak.recent_history(&user.user, limit).await?)
        }
    }
}

async fn run_shop(cmd: ShopCommand, state: &AppState) -> Result<Value, CommandError> {
    let handlers = &state.command_handlers;
    let shop = &state.queries.shop;

    match cmd {
        ShopCommand::Mascots => to_json(shop.list_mascots().await?),
        ShopCommand::Accessories => to_json(shop.list_accessories().await?),
        ShopCommand::MyMascots(UserArg { user }) => to_json(shop.my_mascots(&user).await?),
        ShopCommand::MyAccessories(UserArg { user }) => {
            to_json(shop.my_accessories(&user).await?)
        }
        ShopCommand::Equipped(UserArg { user }) => Ok(json!({
            "mascot": shop.equipped_mascot(&user).await?,
            "accessories": shop.equipped_accessories(&user).await?,
        })),
        ShopCommand::BuyMascot { user, mascot } => to_json(
            handlers
                .buy_mascot
                .handle(BuyMascotCommand {
                    user_id: user.user,
                    mascot_id: mascot,
                })
                .await?,
        ),
        ShopCommand::BuyAccessory { user, accessory } => to_json(
            handlers
                .buy_accessory
                .handle(BuyAccessoryCommand {
                    user_id: user.user,
                    accessory_id: accessory,
                })
                .await?,
        ),
        ShopCommand::EquipMascot { user, mascot } => to_json(
            handlers
                .equip_mascot
                .handle(EquipMascotCommand {
                    user_id: user.user,
                    mascot_id: mascot,
                })
                .await?,
        ),
        ShopCommand::EquipAccessory { user, accessory } => to_json(
            handlers
                .equip_accessory
                .handle(EquipAccessoryCommand {
                    user_id: user.user,
                    accessory_id: accessory,
                })
                .await?,
        ),
        ShopCommand::UnequipAccessory { user, accessory } => to_json(
            handlers
                .unequip_accessory
                .handle(UnequipAccessoryCommand {
                    user_id: user.user,
                    accessory_id: accessory,
                })
                .await?,
        ),
    }
}

async fn run_post(cmd: PostCommand, state: &AppState) -> Result<Value, CommandError> {
    let handlers = &state.command_handlers;
    let community = &state.queries.community;

    match cmd {
        PostCommand::List { user, skip, limit } => {
            to_json(community.list_posts(user.as_deref(), skip, limit).await?)
        }
        PostCommand::Get { user, post } => {
            to_json(community.get_post(user.as_deref(), &post).await?)
        }
        PostCommand::Create {
            user,
            title,
            content,
            image,
        } => {
            let image = read_image(image).await?;
            to_json(
                handlers
                    .create_post
                    .handle(CreatePostCommand {
                        user_id: user.user,
                        title,
                        content,
                        image,
                    })
                    .await?,
            )
        }
        PostCommand::Update {
            user,
            post,
            title,
            content,
            image,
        } => {
            let image = read_image(image).await?;
            to_json(
                handlers
                    .update_post
                    .handle(UpdatePostCommand {
                        user_id: user.user,
                        post_id: post,
                        title,
                        content,
                        image,
                    })
                    .await?,
            )
        }
        PostCommand::Delete { user, post } => {
            handlers
                .delete_post
                .handle(DeletePostCommand {
                    user_id: user.user,
                    post_id: post.clone(),
                })
                .await?;
            Ok(json!({ "post_id": post, "deleted": true }))
        }
        PostCommand::React { user, post, emoji } => to_json(
            handlers
                .react_to_post
                .handle(ReactToPostCommand {
                    user_id: user.user,
                    post_id: post,
                    emoji,
                })
                .await?,
        ),
    }
}
