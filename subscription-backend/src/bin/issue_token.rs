// src/bin/issue_token.rs
//! 開発・運用向けのアクセストークン発行ツール
//!
//! 使い方: issue-token <username> <email> [user_id]

use std::env;
use subscription_backend::config::JwtSettings;
use subscription_backend::domain::user_claims::UserClaims;
use subscription_backend::utils::jwt::JwtManager;
use uuid::Uuid;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.len() < 2 {
        eprintln!("Usage: issue-token <username> <email> [user_id]");
        std::process::exit(1);
    }

    let user_id = match args.get(2) {
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => id,
            Err(e) => {
                eprintln!("Error: invalid user_id '{}': {}", raw, e);
                std::process::exit(1);
            }
        },
        None => Uuid::new_v4(),
    };

    let settings = match JwtSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading JWT settings: {}", e);
            std::process::exit(1);
        }
    };
    let expiry_minutes = settings.access_token_expiry_minutes;

    let manager = match JwtManager::new(settings) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let claims = UserClaims {
        user_id,
        username: args[0].clone(),
        email: args[1].clone(),
    };

    match manager.generate_access_token(claims) {
        Ok(token) => {
            println!("\n=== Access Token Issued ===");
            println!("User ID: {}", user_id);
            println!("Expires in: {} minutes", expiry_minutes);
            println!("Token: {}", token);
            println!("\nTo call the API:");
            println!("Authorization: Bearer {}", token);
        }
        Err(e) => {
            eprintln!("Error generating token: {}", e);
            std::process::exit(1);
        }
    }
}
