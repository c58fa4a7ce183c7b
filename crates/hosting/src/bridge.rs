use super::arena::Arena;
use melee_gameroom::ServerMessage;
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;

/// Spawns the WebSocket bridge between one client session and a room.
///
/// The loop is biased toward draining outbound room messages so a
/// burst of broadcasts is flushed before the next inbound action is
/// read. The outbound channel closing means a reconnect replaced this
/// session's binding; the loop ends without unbinding the newcomer.
pub async fn bridge(
    arena: Arc<Arena>,
    room_id: String,
    pid: String,
    name: String,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) -> anyhow::Result<()> {
    use futures::StreamExt;
    let room = arena.room(&room_id).await;
    let store = arena.store().clone();
    let (tx, mut rx) = unbounded_channel();
    let token = match room.attach(&store, &pid, &name, tx).await {
        Ok(token) => token,
        Err(e) => {
            let _ = session.text(ServerMessage::error(&e).to_json()).await;
            let _ = session.close(None).await;
            return Err(anyhow::anyhow!("{}", e));
        }
    };
    log::debug!("[bridge {}] {} connected", room.id(), pid);
    actix_web::rt::spawn(async move {
        'sesh: loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Some(json) => if session.text(json).await.is_err() { break 'sesh },
                    None => break 'sesh,
                },
                msg = stream.next() => match msg {
                    Some(Ok(actix_ws::Message::Text(text))) => room.apply(&store, &pid, &text).await,
                    Some(Ok(actix_ws::Message::Ping(bytes))) => {
                        let _ = session.pong(&bytes).await;
                    }
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                    Some(Err(_)) => break 'sesh,
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
            }
        }
        room.detach(&store, &pid, token).await;
        log::debug!("[bridge {}] {} disconnected", room.id(), pid);
    });
    Ok(())
}
