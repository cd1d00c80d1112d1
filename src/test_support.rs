//! In-memory transports for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use serde_json::Value;

use crate::graphql::{Executor, GraphqlError, GraphqlRequest, PushStream, Subscriber};

type Responder = Arc<dyn Fn(&Value) -> Result<Value, GraphqlError> + Send + Sync>;
type Delay = Arc<dyn Fn(&Value) -> Duration + Send + Sync>;

/// Answers queries by operation name and records every call.
#[derive(Default)]
pub struct FakeExecutor {
    responders: Mutex<HashMap<&'static str, Responder>>,
    delays: Mutex<HashMap<&'static str, Delay>>,
    calls: Mutex<Vec<(&'static str, Value)>>,
}

impl FakeExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(
        &self,
        operation: &'static str,
        responder: impl Fn(&Value) -> Result<Value, GraphqlError> + Send + Sync + 'static,
    ) -> &Self {
        self.responders
            .lock()
            .unwrap()
            .insert(operation, Arc::new(responder));
        self
    }

    pub fn respond_data(&self, operation: &'static str, data: Value) -> &Self {
        self.respond(operation, move |_| Ok(data.clone()))
    }

    pub fn fail(&self, operation: &'static str, error: GraphqlError) -> &Self {
        self.respond(operation, move |_| Err(error.clone()))
    }

    pub fn delay(
        &self,
        operation: &'static str,
        delay: impl Fn(&Value) -> Duration + Send + Sync + 'static,
    ) -> &Self {
        self.delays.lock().unwrap().insert(operation, Arc::new(delay));
        self
    }

    /// Variables of every call to `operation`, oldest first.
    pub fn calls(&self, operation: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(op, _)| *op == operation)
            .map(|(_, vars)| vars.clone())
            .collect()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls(operation).len()
    }
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, GraphqlError> {
        let operation = request.operation_name;
        let variables = request.variables;
        self.calls.lock().unwrap().push((operation, variables.clone()));

        let delay = self.delays.lock().unwrap().get(operation).cloned();
        if let Some(delay) = delay {
            tokio::time::sleep(delay(&variables)).await;
        }

        let responder = self.responders.lock().unwrap().get(operation).cloned();
        match responder {
            Some(responder) => responder(&variables),
            None => Err(GraphqlError::Server(vec![format!("no responder for {operation}")])),
        }
    }
}

/// Hands out one pre-registered feed per subscription operation.
#[derive(Default)]
pub struct FakeSubscriber {
    feeds: Mutex<HashMap<&'static str, UnboundedReceiver<Result<Value, GraphqlError>>>>,
}

impl FakeSubscriber {
    /// The sender side of the next subscription to `operation`.
    pub fn feed(&self, operation: &'static str) -> UnboundedSender<Result<Value, GraphqlError>> {
        let (tx, rx) = mpsc::unbounded();
        self.feeds.lock().unwrap().insert(operation, rx);
        tx
    }
}

#[async_trait]
impl Subscriber for FakeSubscriber {
    async fn subscribe(&self, request: GraphqlRequest) -> Result<PushStream, GraphqlError> {
        let feed = self.feeds.lock().unwrap().remove(request.operation_name);
        match feed {
            Some(rx) => Ok(rx.boxed()),
            None => Err(GraphqlError::Protocol(format!(
                "no feed for {}",
                request.operation_name
            ))),
        }
    }
}
