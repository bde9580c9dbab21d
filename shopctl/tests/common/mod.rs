// Copyright AGNTCY Contributors (https://github.com/agntcy)
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::server::Router;
use tonic::transport::{Channel, Endpoint};

use shopctl::menu::{Menu, run_menu};
use shopctl::prompt::Prompter;

pub type ScriptedPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

/// Requests seen by a mock service, in arrival order.
pub type Calls<T> = Arc<Mutex<Vec<T>>>;

pub fn calls<T>() -> Calls<T> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn taken<T: Clone>(calls: &Calls<T>) -> Vec<T> {
    calls.lock().unwrap().clone()
}

/// Serve `router` on an ephemeral local port and return a channel to it.
pub async fn serve(router: Router) -> Channel {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(router.serve_with_incoming(TcpListenerStream::new(listener)));
    Endpoint::from_shared(format!("http://{addr}"))
        .unwrap()
        .connect_lazy()
}

/// Channel to a port nothing listens on.
pub async fn unreachable() -> Channel {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Endpoint::from_shared(format!("http://{addr}"))
        .unwrap()
        .connect_lazy()
}

pub fn scripted(lines: &[&str]) -> ScriptedPrompter {
    let mut input = lines.join("\n");
    input.push('\n');
    Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

/// Run `menu` over the scripted answers and return everything it printed.
pub async fn drive<M: Menu>(menu: &mut M, lines: &[&str]) -> String {
    let mut prompter = scripted(lines);
    run_menu(menu, &mut prompter).await.unwrap();
    String::from_utf8(prompter.into_output()).unwrap()
}
