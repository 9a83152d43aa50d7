//! Terminal chat client
//!
//! The thinnest possible display collaborator: stdin lines go out through
//! the agent, inbound events print to stdout as `[sender] body`.

use log::error;
use tokio::io::{AsyncBufReadExt, BufReader};

use chat_relay::client::{ChatClient, ClientEvent};
use chat_relay::config::ClientConfig;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let username = match std::env::args().nth(1) {
        Some(name) => name,
        None => {
            println!("Enter username:");
            match lines.next_line().await {
                Ok(Some(name)) => name,
                _ => String::new(),
            }
        }
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        eprintln!("Username cannot be empty");
        std::process::exit(1);
    }

    let (client, mut events) = match ChatClient::connect(&config).await {
        Ok(connected) => connected,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!("[SERVER] Successfully connected to {}", config.socket_addr());

    if let Err(e) = client.join(&username).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let mut stdin_open = true;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(ClientEvent::Message { sender, body }) => {
                    println!("[{}] {}", sender, body);
                }
                Some(ClientEvent::Malformed(raw)) => {
                    eprintln!("Received an unframed message from the server: {}", raw);
                }
                Some(ClientEvent::Disconnected) | None => {
                    println!("[SERVER] Connection closed");
                    break;
                }
            },
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(text)) => {
                    if text.is_empty() {
                        eprintln!("Message cannot be empty");
                        continue;
                    }
                    if let Err(e) = client.send(&text).await {
                        eprintln!("{}", e);
                        break;
                    }
                }
                // End of stdin: hang up and wait for the server to confirm.
                Ok(None) | Err(_) => {
                    stdin_open = false;
                    client.disconnect().await;
                }
            },
        }
    }

    client.disconnect().await;
}
