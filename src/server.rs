//! TCP Accept Loop
//!
//! Accepts connections forever and spawns one task per client. Every task
//! runs concurrently with the others and with the loop itself.

use crate::commands::CommandHandler;
use crate::connection::{handle_connection, ConnectionStats};
use crate::storage::StorageEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error};

/// Main loop that accepts incoming connections.
///
/// A failed `accept` is logged and the loop keeps going; it never returns.
pub async fn accept_loop(
    listener: TcpListener,
    storage: Arc<StorageEngine>,
    stats: Arc<ConnectionStats>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                debug!(client = %addr, "Accepted connection");

                // Create a command handler for this connection
                let handler = CommandHandler::new(Arc::clone(&storage));
                let stats = Arc::clone(&stats);

                tokio::spawn(handle_connection(stream, addr, handler, stats));
            }
            Err(e) => {
                error!("Error accepting connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn create_test_server() -> (SocketAddr, Arc<StorageEngine>, Arc<ConnectionStats>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let storage = Arc::new(StorageEngine::new());
        let stats = Arc::new(ConnectionStats::new());

        tokio::spawn(accept_loop(
            listener,
            Arc::clone(&storage),
            Arc::clone(&stats),
        ));

        (addr, storage, stats)
    }

    async fn send(client: &mut TcpStream, request: &[u8], reply_len: usize) -> Vec<u8> {
        client.write_all(request).await.unwrap();
        let mut buf = vec![0u8; reply_len];
        client.read_exact(&mut buf).await.unwrap();
        buf
    }

    #[tokio::test]
    async fn test_ping_pong() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        assert_eq!(send(&mut client, b"+PING\r\n", 7).await, b"+PONG\r\n");
    }

    #[tokio::test]
    async fn test_echo() {
        let (addr, _, _) = create_test_server().await;
        let mut client = TcpStream::connect(addr).await.unwrap();

        let reply = send(&mut client, b"$10\r\necho hello\r\n", 11).await;
        assert_eq!(reply, b"$5\r\nhello\r\n");
    }

    #[tokio::test]
    async fn test_set_from_two_clients_visible_to_both() {
        let (addr, storage, stats) = create_test_server().await;

        let mut a = TcpStream::connect(addr).await.unwrap();
        let mut b = TcpStream::connect(addr).await.unwrap();

        let (ra, rb) = tokio::join!(
            send(&mut a, b"+SET left 1\r\n", 5),
            send(&mut b, b"+SET right 2\r\n", 5),
        );
        assert_eq!(ra, b"+OK\r\n");
        assert_eq!(rb, b"+OK\r\n");

        assert_eq!(send(&mut a, b"+GET right\r\n", 4).await, b"+2\r\n");
        assert_eq!(send(&mut b, b"+GET left\r\n", 4).await, b"+1\r\n");

        assert_eq!(storage.len(), 2);
        assert_eq!(stats.connections_accepted.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_bad_client_does_not_affect_others() {
        let (addr, _, _) = create_test_server().await;

        let mut bad = TcpStream::connect(addr).await.unwrap();
        bad.write_all(b"!garbage\r\n").await.unwrap();

        // The server closes the bad connection without replying.
        let mut buf = Vec::new();
        let result = tokio::time::timeout(Duration::from_secs(2), bad.read_to_end(&mut buf))
            .await
            .expect("server kept a bad connection open");
        match result {
            Ok(n) => assert_eq!(n, 0),
            Err(e) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
        }

        let mut good = TcpStream::connect(addr).await.unwrap();
        assert_eq!(send(&mut good, b"+PING\r\n", 7).await, b"+PONG\r\n");
    }
}
