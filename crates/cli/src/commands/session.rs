//! Login, logout, and whoami.

use clementine_client::session::LoginOutcome;

use super::App;

pub async fn login(app: &App, username: &str, password: &str) {
    match app.session.login(username, password).await {
        LoginOutcome::Success(user) => {
            println!("Logged in as {} <{}>", user.username, user.email);
        }
        LoginOutcome::Failed(message) => println!("Login failed: {message}"),
    }
}

pub fn logout(app: &App) {
    app.session.logout();
    println!("Logged out.");
}

pub async fn whoami(app: &App) {
    match app.session.restore().await {
        Some(user) => {
            let name = format!("{} {}", user.first_name, user.last_name);
            let name = name.trim();
            if name.is_empty() {
                println!("{} <{}>", user.username, user.email);
            } else {
                println!("{} ({name}) <{}>", user.username, user.email);
            }
        }
        None => println!("Not logged in."),
    }
}
