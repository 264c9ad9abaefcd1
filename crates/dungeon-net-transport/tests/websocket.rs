//! Integration tests for the WebSocket transport.
//!
//! These spin up a real server on an OS-assigned port and talk to it with
//! a plain `tokio-tungstenite` client, so the bytes really cross a socket.

#[cfg(feature = "websocket")]
mod websocket {
    use dungeon_net_transport::{
        Connection, Transport, TransportError, WebSocketConnection,
        WebSocketTransport,
    };
    use futures_util::{SinkExt, StreamExt};
    use tokio_tungstenite::tungstenite::Message;

    async fn bind_any() -> (WebSocketTransport, String) {
        let transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().expect("bound address").to_string();
        (transport, addr)
    }

    /// Helper: connects a raw tokio-tungstenite client to the given address.
    async fn connect_client(
        addr: &str,
    ) -> tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    > {
        let url = format!("ws://{addr}");
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("client should connect");
        ws
    }

    #[tokio::test]
    async fn test_websocket_accept_and_send_receive_text() {
        let (mut transport, addr) = bind_any().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.expect("task should complete");
        assert!(server_conn.id().into_inner() > 0);

        // --- Server sends, client receives a text frame ---
        server_conn
            .send("NewMonster::3::17::5::-2::0")
            .await
            .expect("send should succeed");

        let msg = client_ws.next().await.unwrap().unwrap();
        assert!(msg.is_text());
        assert_eq!(msg.into_text().unwrap().as_str(), "NewMonster::3::17::5::-2::0");

        // --- Client sends, server receives ---
        client_ws
            .send(Message::text("PlayerMoved::4::10::11::3"))
            .await
            .unwrap();

        let received = server_conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received, "PlayerMoved::4::10::11::3");

        server_conn.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_websocket_binary_utf8_is_accepted() {
        let (mut transport, addr) = bind_any().await;
        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        client_ws
            .send(Message::Binary(b"1::2".to_vec().into()))
            .await
            .unwrap();
        let received = server_conn.recv().await.unwrap();
        assert_eq!(received.as_deref(), Some("1::2"));
    }

    #[tokio::test]
    async fn test_websocket_binary_invalid_utf8_is_error() {
        let (mut transport, addr) = bind_any().await;
        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        client_ws
            .send(Message::Binary(vec![0xff, 0xfe].into()))
            .await
            .unwrap();
        assert!(server_conn.recv().await.is_err());
    }

    #[tokio::test]
    async fn test_websocket_recv_returns_none_on_client_close() {
        let (mut transport, addr) = bind_any().await;
        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        client_ws.send(Message::Close(None)).await.unwrap();

        let result = server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }

    #[tokio::test]
    async fn test_connection_connect_talks_to_transport() {
        let (mut transport, addr) = bind_any().await;
        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let client = WebSocketConnection::connect(&format!("ws://{addr}"))
            .await
            .expect("should connect");
        let server_conn = server_handle.await.unwrap();

        server_conn.send("hello").await.unwrap();
        assert_eq!(client.recv().await.unwrap().as_deref(), Some("hello"));

        client.send("hi").await.unwrap();
        assert_eq!(server_conn.recv().await.unwrap().as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn test_shutdown_stops_accepting() {
        let (mut transport, _addr) = bind_any().await;
        transport.shutdown().await.expect("shutdown should succeed");

        let err = transport.accept().await.err().expect("accept should fail");
        assert!(matches!(err, TransportError::Shutdown));
    }
}
