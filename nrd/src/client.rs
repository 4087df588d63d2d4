// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control-channel client for the local BGP speaker.
//!
//! The speaker exposes a line-oriented JSON protocol on a unix socket:
//! one request object per line, one response object per line. The
//! connection is established once at startup and dropped on every exit
//! path; a connect failure is fatal before any reconciliation begins.

use crate::error::Error;
use announce::{Error as AnnounceError, PathUpdate, RoutingClient};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    ListActive,
    Submit { update: PathUpdate },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum Response {
    Prefixes { prefixes: Vec<String> },
    Done,
    Error { message: String },
}

pub struct SpeakerClient {
    stream: Mutex<BufReader<UnixStream>>,
}

impl SpeakerClient {
    pub fn connect(path: &Path) -> Result<Self, Error> {
        let stream = UnixStream::connect(path)?;
        Ok(Self {
            stream: Mutex::new(BufReader::new(stream)),
        })
    }

    fn call(&self, req: &Request) -> Result<Response, Error> {
        let mut stream = self.stream.lock().unwrap();
        let mut line = serde_json::to_string(req)
            .map_err(|e| Error::Speaker(e.to_string()))?;
        line.push('\n');
        stream.get_mut().write_all(line.as_bytes())?;

        let mut reply = String::new();
        stream.read_line(&mut reply)?;
        serde_json::from_str(&reply)
            .map_err(|e| Error::Speaker(e.to_string()))
    }
}

impl RoutingClient for SpeakerClient {
    fn list_active_ipv4_unicast(&self) -> Result<Vec<String>, AnnounceError> {
        match self.call(&Request::ListActive) {
            Ok(Response::Prefixes { prefixes }) => Ok(prefixes),
            Ok(Response::Error { message }) => {
                Err(AnnounceError::Snapshot(message))
            }
            Ok(_) => Err(AnnounceError::Snapshot("unexpected reply".into())),
            Err(e) => Err(AnnounceError::Snapshot(e.to_string())),
        }
    }

    fn submit_path(&self, update: &PathUpdate) -> Result<(), AnnounceError> {
        let prefix = update.prefix.to_string();
        match self.call(&Request::Submit {
            update: update.clone(),
        }) {
            Ok(Response::Done) => Ok(()),
            Ok(Response::Error { message }) => {
                Err(AnnounceError::Submit { prefix, message })
            }
            Ok(_) => Err(AnnounceError::Submit {
                prefix,
                message: "unexpected reply".into(),
            }),
            Err(e) => Err(AnnounceError::Submit {
                prefix,
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use announce::AttributeEncoder;
    use pretty_assertions::assert_eq;
    use pset::Prefix4;
    use slog::Logger;
    use std::net::Ipv4Addr;
    use std::os::unix::net::UnixListener;
    use std::str::FromStr;
    use std::thread;

    // A scripted speaker on the other end of the socket.
    fn spawn_speaker(
        path: std::path::PathBuf,
        replies: Vec<String>,
    ) -> thread::JoinHandle<Vec<String>> {
        let listener = UnixListener::bind(&path).unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut stream = stream;
            let mut received = Vec::new();
            for reply in replies {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 {
                    break;
                }
                received.push(line.trim().to_string());
                stream.write_all(reply.as_bytes()).unwrap();
                stream.write_all(b"\n").unwrap();
            }
            received
        })
    }

    fn socket_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("nrd-speaker-{}-{}.sock", tag, std::process::id()))
    }

    #[test]
    fn list_and_submit_round_trip() {
        let path = socket_path("ok");
        std::fs::remove_file(&path).ok();
        let speaker = spawn_speaker(
            path.clone(),
            vec![
                r#"{"result":"prefixes","prefixes":["203.0.113.0/24"]}"#
                    .to_string(),
                r#"{"result":"done"}"#.to_string(),
            ],
        );

        let client = SpeakerClient::connect(&path).unwrap();
        assert_eq!(
            client.list_active_ipv4_unicast().unwrap(),
            vec!["203.0.113.0/24".to_string()]
        );

        let enc = AttributeEncoder::new(
            Ipv4Addr::new(192, 0, 2, 1),
            &[],
            Logger::root(slog::Discard, slog::o!()),
        );
        let up = enc.encode(Prefix4::from_str("192.0.2.0/24").unwrap(), false);
        client.submit_path(&up).unwrap();

        let received = speaker.join().unwrap();
        assert_eq!(received.len(), 2);
        assert!(received[0].contains("list_active"));
        assert!(received[1].contains("192.0.2.0/24"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn speaker_error_is_per_operation() {
        let path = socket_path("err");
        std::fs::remove_file(&path).ok();
        let speaker = spawn_speaker(
            path.clone(),
            vec![r#"{"result":"error","message":"table locked"}"#.to_string()],
        );

        let client = SpeakerClient::connect(&path).unwrap();
        let err = client.list_active_ipv4_unicast().unwrap_err();
        assert!(err.to_string().contains("table locked"));

        speaker.join().unwrap();
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn connect_failure_is_fatal() {
        assert!(SpeakerClient::connect(Path::new(
            "/nonexistent/speaker.sock"
        ))
        .is_err());
    }
}
