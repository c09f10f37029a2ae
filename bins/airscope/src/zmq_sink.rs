use tetra_core::EventSink;

/// Push-style message queue sink for the JSON event stream. One complete
/// JSON object per message, newline included so file consumers can `cat`.
pub struct ZmqSink {
    socket: zmq::Socket,
}

impl ZmqSink {
    pub fn connect(url: &str) -> Result<Self, zmq::Error> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::PUSH)?;
        socket.connect(url)?;
        Ok(ZmqSink { socket })
    }
}

impl EventSink for ZmqSink {
    fn send_line(&mut self, line: &str) {
        if let Err(e) = self.socket.send(line, 0) {
            // the sink failing is fatal for the pipeline contract, but a
            // slow consumer only blocks; log anything else
            tracing::error!("event sink send failed: {}", e);
        }
    }
}
