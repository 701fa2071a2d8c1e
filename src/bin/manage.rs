use clap::{Parser, Subcommand};
use serde_json::{json, Map};
use tracing::info;

use gp_booking::config::EnvConfig;
use gp_booking::db::postgres_service::PostgresService;
use gp_booking::types::user::RUser;
use gp_booking::utils::token::hash_password;

/// Administrative tasks that have no HTTP surface.
#[derive(Parser)]
#[command(name = "manage")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a user who can log in through /token/.
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        staff: bool,
    },
    /// Create an empty group.
    CreateGroup {
        #[arg(long)]
        name: String,
    },
    /// Put an existing user into an existing group.
    AddToGroup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        group: String,
    },
    /// List the groups a user belongs to.
    Groups {
        #[arg(long)]
        username: String,
    },
    /// List a group's members.
    Members {
        #[arg(long)]
        group: String,
    },
    /// Grant a permission to a user, creating the permission if it does not exist yet.
    GrantPermission {
        #[arg(long)]
        username: String,
        #[arg(long)]
        codename: String,
        /// Human-readable name for a newly created permission.
        #[arg(long)]
        name: Option<String>,
    },
    /// List the permissions granted directly to a user.
    Permissions {
        #[arg(long)]
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let db = PostgresService::new(&EnvConfig::database_url()).await?;

    match cli.command {
        Command::CreateUser { username, password, email, staff } => {
            let mut body = Map::new();
            body.insert("username".into(), json!(username));
            body.insert("password".into(), json!(password));
            if let Some(email) = email {
                body.insert("email".into(), json!(email));
            }

            let mut payload = RUser::read(body, false)?;
            let hash = payload.password.take().map(|p| hash_password(&p)).transpose()?;
            let mut user = db.create_user(payload, hash).await?;
            if staff {
                user = db.set_user_staff(user.id, true).await?;
            }
            info!(user_id = %user.id, is_staff = user.is_staff, "user created");
            println!("{}", user.id);
        }
        Command::CreateGroup { name } => {
            let group = db.create_group(name).await?;
            println!("{}", group.id);
        }
        Command::AddToGroup { username, group } => {
            let user = db.get_user_by_username(&username).await?;
            let group = db.get_group_by_name(&group).await?;
            db.add_user_to_group(user.id, group.id).await?;
            info!(user_id = %user.id, group = %group.name, "user added to group");
        }
        Command::Groups { username } => {
            let user = db.get_user_by_username(&username).await?;
            for name in db.list_user_group_names(user.id).await? {
                println!("{name}");
            }
        }
        Command::Members { group } => {
            let group = db.get_group_by_name(&group).await?;
            for username in db.list_group_member_usernames(group.id).await? {
                println!("{username}");
            }
        }
        Command::GrantPermission { username, codename, name } => {
            let user = db.get_user_by_username(&username).await?;
            let permission = db.ensure_permission(&codename, name).await?;
            db.grant_permission(user.id, permission.id).await?;
            info!(user_id = %user.id, permission = %permission.codename, "permission granted");
        }
        Command::Permissions { username } => {
            let user = db.get_user_by_username(&username).await?;
            for codename in db.list_user_permission_codenames(user.id).await? {
                println!("{codename}");
            }
        }
    }

    Ok(())
}
