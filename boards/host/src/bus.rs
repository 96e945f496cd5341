//! Bus stand-in: one JSON object per line, `{"topic": ..., "message": ...}`

use std::io::Write;

use hal::publisher::Publisher;
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a, T> {
    topic: &'a str,
    message: &'a T,
}

pub struct JsonLinePublisher<W> {
    topic: &'static str,
    writer: W,
}

impl<W: Write> JsonLinePublisher<W> {
    pub fn new(topic: &'static str, writer: W) -> Self {
        Self { topic, writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write, T: Serialize> Publisher<T> for JsonLinePublisher<W> {
    fn publish(&mut self, message: &T) {
        let envelope = Envelope { topic: self.topic, message };
        let result = serde_json::to_writer(&mut self.writer, &envelope)
            .map_err(std::io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            error!("Publish on {} failed: {}", self.topic, e);
        }
    }
}
