//! rent-a-game interactive client binary.
//!
//! Reads a line from the operator, sends it to the server, prints the
//! reply. Typing `exit` ends the client locally without sending `BYE`; the
//! server sees a plain close instead.

use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use rent_a_game::config::{ClientArgs, ClientConfig};
use rent_a_game::line::{LineReader, ReadLine};
use rent_a_game::server::peer_ip;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ClientArgs::parse();
    let config = ClientConfig::load(&args.config)?;

    let stream =
        TcpStream::connect(format!("{}:{}", config.server_ip, config.server_port)).await?;
    println!("client: connecting to {}", peer_ip(&stream.peer_addr()?));

    let (reader, mut writer) = stream.into_split();
    let mut replies = LineReader::new(reader);
    let mut operator = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        // EOF on stdin ends the loop like `exit`.
        let Some(input) = operator.next_line().await? else {
            break;
        };
        if input == "exit" {
            break;
        }

        writer.write_all(input.as_bytes()).await?;
        writer.write_all(b"\n").await?;

        match replies.next_line().await? {
            ReadLine::Line(reply) => println!("Server: {reply}"),
            ReadLine::TooLong => eprintln!("client: reply too long, ignored"),
            ReadLine::Eof => {
                println!("Server closed the connection.");
                break;
            }
        }
    }

    Ok(())
}
