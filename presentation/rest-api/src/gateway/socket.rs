use std::sync::Arc;

use futures_util::{Sink, SinkExt, StreamExt};
use poem::web::Data;
use poem::web::websocket::{Message, WebSocket, WebSocketStream};
use poem::{IntoResponse, handler};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use business::domain::logger::Logger;
use business::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use realtime::ProductHub;

use super::messages::{ClientMessage, ServerMessage};

/// Bridges websocket clients to the product hub.
///
/// Client requests go through the same use cases as the REST API; their
/// results reach every client through the hub's broadcast, and only failures
/// are answered directly.
pub struct RealtimeGateway {
    hub: Arc<ProductHub>,
    create_use_case: Arc<dyn CreateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    logger: Arc<dyn Logger>,
}

impl RealtimeGateway {
    pub fn new(
        hub: Arc<ProductHub>,
        create_use_case: Arc<dyn CreateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            hub,
            create_use_case,
            delete_use_case,
            logger,
        }
    }

    /// Handles one text frame. Returns the reply meant for the sender only.
    pub async fn handle_text(&self, text: &str) -> Option<ServerMessage> {
        let message = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => message,
            Err(e) => {
                self.logger
                    .warn(&format!("Ignoring malformed realtime message: {e}"));
                return Some(ServerMessage::error("realtime.invalid_message"));
            }
        };

        match message {
            ClientMessage::NewProduct(payload) => {
                let params = CreateProductParams {
                    props: payload.into(),
                    image: None,
                };
                match self.create_use_case.execute(params).await {
                    Ok(_) => None,
                    Err(err) => {
                        self.logger
                            .warn(&format!("Realtime product creation rejected: {err}"));
                        Some(ServerMessage::error(err.to_string()))
                    }
                }
            }
            ClientMessage::DeleteProduct(raw_id) => {
                let Ok(id) = Uuid::parse_str(raw_id.trim()) else {
                    return Some(ServerMessage::error("product.invalid_id"));
                };
                match self.delete_use_case.execute(DeleteProductParams { id }).await {
                    Ok(()) => None,
                    Err(err) => {
                        self.logger
                            .warn(&format!("Realtime product deletion rejected: {err}"));
                        Some(ServerMessage::error(err.to_string()))
                    }
                }
            }
        }
    }

    /// Runs one connection until the client leaves or the hub shuts down.
    pub async fn serve(&self, socket: WebSocketStream) {
        let (mut sink, mut stream) = socket.split();
        let (snapshot, mut events) = self.hub.connect();
        self.logger.debug(&format!(
            "Realtime client connected ({} subscribers)",
            self.hub.subscriber_count()
        ));

        if send(&mut sink, &ServerMessage::product_list(snapshot))
            .await
            .is_err()
        {
            return;
        }

        loop {
            let outgoing = tokio::select! {
                incoming = stream.next() => match incoming {
                    Some(Ok(Message::Text(text))) => self.handle_text(&text).await,
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => None,
                },
                event = events.recv() => match event {
                    Ok(event) => Some(ServerMessage::from(event.as_ref())),
                    Err(RecvError::Lagged(skipped)) => {
                        self.logger.warn(&format!(
                            "Realtime client lagged by {skipped} events, resending catalog"
                        ));
                        let (snapshot, receiver) = self.hub.connect();
                        events = receiver;
                        Some(ServerMessage::product_list(snapshot))
                    }
                    Err(RecvError::Closed) => break,
                },
            };

            if let Some(message) = outgoing
                && send(&mut sink, &message).await.is_err()
            {
                break;
            }
        }

        self.logger.debug("Realtime client disconnected");
    }
}

async fn send<S>(sink: &mut S, message: &ServerMessage) -> Result<(), ()>
where
    S: Sink<Message> + Unpin,
{
    let text = serde_json::to_string(message).map_err(|e| {
        tracing::error!(error = %e, "failed to encode realtime frame");
    })?;
    sink.send(Message::Text(text)).await.map_err(|_| ())
}

#[handler]
pub fn websocket(ws: WebSocket, gateway: Data<&Arc<RealtimeGateway>>) -> impl IntoResponse {
    let gateway = Arc::clone(gateway.0);
    ws.on_upgrade(move |socket| async move { gateway.serve(socket).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::application::product::create::CreateProductUseCaseImpl;
    use business::application::product::delete::DeleteProductUseCaseImpl;
    use business::domain::product::events::ProductEventPublisher;
    use business::domain::product::repository::ProductRepository;
    use logger::TracingLogger;
    use persistence::memory::product::MemoryProductRepository;
    use persistence::memory::store::MemoryStore;
    use uploads::DiskImageStorage;

    fn gateway(hub: Arc<ProductHub>, uploads: &std::path::Path) -> RealtimeGateway {
        let repository: Arc<dyn ProductRepository> =
            Arc::new(MemoryProductRepository::new(MemoryStore::new()));
        let publisher: Arc<dyn ProductEventPublisher> = hub.clone();
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("test"));
        RealtimeGateway::new(
            hub,
            Arc::new(CreateProductUseCaseImpl {
                repository: repository.clone(),
                image_storage: Arc::new(DiskImageStorage::new(uploads, "/uploads")),
                publisher: publisher.clone(),
                logger: logger.clone(),
            }),
            Arc::new(DeleteProductUseCaseImpl {
                repository,
                publisher,
                logger: logger.clone(),
            }),
            logger,
        )
    }

    const NEW_PRODUCT: &str = r#"{"event":"newProduct","data":{
        "title":"Bombilla","description":"Steel straw","code":"BOM-1",
        "price":7.5,"stock":"4","category":"kitchen"}}"#;

    #[tokio::test]
    async fn should_broadcast_products_created_over_the_socket() {
        let dir = tempfile::tempdir().unwrap();
        let hub = Arc::new(ProductHub::default());
        let (_, mut events) = hub.connect();
        let gateway = gateway(hub.clone(), dir.path());

        let reply = gateway.handle_text(NEW_PRODUCT).await;

        assert!(reply.is_none());
        let event = events.recv().await.unwrap();
        let ServerMessage::ProductAdded(product) = ServerMessage::from(event.as_ref()) else {
            panic!("expected productAdded");
        };
        assert_eq!(product.price, 7.5);
        assert_eq!(product.stock, 4);
        assert_eq!(hub.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn should_reply_with_error_when_product_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let hub = Arc::new(ProductHub::default());
        let gateway = gateway(hub.clone(), dir.path());

        let reply = gateway
            .handle_text(r#"{"event":"newProduct","data":{"title":"Only a title"}}"#)
            .await;

        assert!(matches!(
            reply,
            Some(ServerMessage::Error { message }) if message == "product.missing_fields"
        ));
        assert!(hub.snapshot().is_empty());
    }

    #[tokio::test]
    async fn should_announce_deletions_and_drop_them_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let hub = Arc::new(ProductHub::default());
        let gateway = gateway(hub.clone(), dir.path());
        gateway.handle_text(NEW_PRODUCT).await;
        let id = hub.snapshot()[0].id;
        let (_, mut events) = hub.connect();

        let reply = gateway
            .handle_text(&format!(r#"{{"event":"deleteProduct","data":"{id}"}}"#))
            .await;

        assert!(reply.is_none());
        assert!(matches!(
            ServerMessage::from(events.recv().await.unwrap().as_ref()),
            ServerMessage::ProductDeleted(deleted) if deleted == id
        ));
        assert!(hub.snapshot().is_empty());
    }

    #[tokio::test]
    async fn should_reject_malformed_frames() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = gateway(Arc::new(ProductHub::default()), dir.path());

        let reply = gateway.handle_text("not json").await;
        let unknown_id = gateway
            .handle_text(r#"{"event":"deleteProduct","data":"nope"}"#)
            .await;

        assert!(matches!(
            reply,
            Some(ServerMessage::Error { message }) if message == "realtime.invalid_message"
        ));
        assert!(matches!(
            unknown_id,
            Some(ServerMessage::Error { message }) if message == "product.invalid_id"
        ));
    }
}
