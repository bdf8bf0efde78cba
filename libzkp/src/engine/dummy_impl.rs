use crate::engine::{Argument, Engine, EngineError, Operation, Response};
use log::*;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

/// A scripted engine. It replays queued responses in order and records every call it receives.
///
/// With nothing queued, every call fails with a transport error.
#[derive(Debug, Default)]
pub struct DummyEngine {
    responses: Mutex<VecDeque<Result<Response, EngineError>>>,
    calls: Mutex<Vec<(Operation, Vec<Argument>)>>,
}

impl DummyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: Result<Response, EngineError>) -> &Self {
        match self.responses.lock() {
            Ok(mut queue) => queue.push_back(response),
            Err(poisoned) => poisoned.into_inner().push_back(response),
        }
        self
    }

    pub fn respond_text(&self, text: impl Into<String>) -> &Self {
        self.respond(Ok(Response::Text(text.into())))
    }

    pub fn respond_bool(&self, b: bool) -> &Self {
        self.respond(Ok(Response::Bool(b)))
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<(Operation, Vec<Argument>)> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last_call(&self) -> Option<(Operation, Vec<Argument>)> {
        self.calls().pop()
    }

    fn next_response(&self, operation: Operation, arguments: Vec<Argument>) -> Result<Response, EngineError> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push((operation, arguments)),
            Err(poisoned) => poisoned.into_inner().push((operation, arguments)),
        }
        let next = match self.responses.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        next.unwrap_or_else(|| Err(EngineError::Transport(format!("no scripted response for {operation}"))))
    }
}

impl Engine for DummyEngine {
    fn invoke(
        &self,
        operation: Operation,
        arguments: Vec<Argument>,
    ) -> impl Future<Output = Result<Response, EngineError>> + Send {
        info!("Dummy engine called: {operation}");
        let response = self.next_response(operation, arguments);
        async move { response }
    }
}
