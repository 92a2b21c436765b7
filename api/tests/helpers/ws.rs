use axum::Router;
use futures_util::StreamExt;
use serde_json::Value;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::client::IntoClientRequest,
    tungstenite::protocol::Message,
};
use url::Url;

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Spawns the Axum app on a random local port
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// Connects to the chat room of `ticket_id`.
pub async fn connect_ws(
    addr: &SocketAddr,
    ticket_id: i64,
) -> Result<
    (WsClient, axum::http::Response<Option<Vec<u8>>>),
    tokio_tungstenite::tungstenite::Error,
> {
    let url = Url::parse(&format!("ws://{addr}/ws/tickets/{ticket_id}")).unwrap();
    let req = url.to_string().into_client_request().unwrap();
    connect_async(req).await
}

/// Next JSON text frame, skipping WS-level pings. Panics after two seconds.
pub async fn next_json(ws: &mut WsClient) -> Value {
    let fut = async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                other => panic!("unexpected frame: {other:?}"),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(2), fut)
        .await
        .expect("timed out waiting for a frame")
}

/// Asserts nothing arrives within `ms` milliseconds.
pub async fn assert_silent(ws: &mut WsClient, ms: u64) {
    let res = tokio::time::timeout(Duration::from_millis(ms), ws.next()).await;
    assert!(res.is_err(), "expected no frame, got {res:?}");
}

/// Connects to a ticket's room and waits until the server has subscribed the
/// socket, using an app-level ping round trip.
pub async fn join_room(addr: &SocketAddr, ticket_id: i64) -> WsClient {
    use futures_util::SinkExt;

    let (mut ws, _) = connect_ws(addr, ticket_id).await.unwrap();
    ws.send(Message::Text(r#"{"type":"ping"}"#.into()))
        .await
        .unwrap();
    let pong = next_json(&mut ws).await;
    assert_eq!(pong["event"], "pong");
    ws
}
