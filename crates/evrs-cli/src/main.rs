use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use evrs_auth::TokenKeys;
use evrs_config::JwtConfig;

#[derive(Parser)]
#[command(name = "evrs-cli")]
#[command(about = "EVRS CLI - Administrative tools for EVRS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account (use this for the first admin)
    CreateAdmin {
        /// Full name of the admin
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Mint a token with the configured JWT secret
    IssueToken {
        /// citizen, hcp, hospital, moh or admin
        #[arg(short = 'r', long)]
        role: String,

        /// Account id to embed in the token
        #[arg(short = 'i', long)]
        id: String,
    },
    /// Evaluate the frontend route gate for a path
    Gate {
        /// Request path, e.g. /admin/dashboard
        #[arg(long)]
        path: String,

        /// Name of a cookie that is present (repeatable)
        #[arg(long = "cookie")]
        cookies: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            full_name,
            email,
            password,
        } => handle_create_admin(full_name, email, password).await,
        Commands::IssueToken { role, id } => handle_issue_token(&role, &id),
        Commands::Gate { path, cookies } => handle_gate(&path, &cookies),
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {context}: {err}");
    std::process::exit(1);
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail("Failed to read input", e))
}

async fn handle_create_admin(
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let full_name = full_name.unwrap_or_else(|| prompt("Full name"));
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    let pool = evrs_db::init_db_pool()
        .await
        .unwrap_or_else(|e| fail("Failed to connect to database", e));

    match evrs_cli::create_admin(&pool, &full_name, &email, &password).await {
        Ok(admin_id) => {
            println!("\n✅ Admin created successfully!");
            println!("   Admin id: {admin_id}");
            println!("   Email: {email}");
            println!("   Name: {full_name}");
        }
        Err(e) => fail("Error creating admin", e),
    }
}

fn handle_issue_token(role: &str, id: &str) {
    let keys = TokenKeys::from_config(&JwtConfig::from_env());
    match evrs_cli::issue_token(&keys, role, id) {
        Ok(token) => println!("{token}"),
        Err(e) => fail("Error issuing token", e),
    }
}

fn handle_gate(path: &str, cookies: &[String]) {
    match evrs_cli::gate_report(path, cookies) {
        Ok(report) => println!("{report}"),
        Err(e) => fail("Error evaluating gate", e),
    }
}
