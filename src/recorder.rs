//! Buffered capture of a downstream response.
//!
//! A [`ResponseRecorder`] stands in for the real output so an outer stage can
//! look at the final status and body before anything leaves the process. Once
//! the inner handler is done, [`replay`](ResponseRecorder::replay) copies the
//! buffered response onto the real sink in a fixed order: headers, then
//! status, then body.
//!
//! Recording means the client sees nothing until the inner handler has
//! finished and the whole body is held in memory. That is fine for
//! inspection and logging but wrong for large or streaming bodies.

use crate::response::{Response, ResponseWriter};
use crate::status::Status;

/// In-memory [`ResponseWriter`]. The status defaults to `200` until written.
#[derive(Clone, Debug)]
pub struct ResponseRecorder {
    headers: Vec<(String, String)>,
    status: u16,
    body: Vec<u8>,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self { headers: Vec::new(), status: Status::Ok.into(), body: Vec::new() }
    }

    /// Records a finished response as if its handler had written it here.
    pub fn record(response: Response) -> Self {
        let mut rec = Self::new();
        for (name, value) in &response.headers {
            rec.append_header(name, value);
        }
        rec.write_status(response.status);
        rec.write_body(&response.body);
        rec
    }

    pub fn status(&self) -> u16 { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Copies the buffered response onto `sink`: every header, then the
    /// status, then the body.
    pub fn replay<W: ResponseWriter + ?Sized>(self, sink: &mut W) {
        for (name, value) in &self.headers {
            sink.append_header(name, value);
        }
        sink.write_status(self.status);
        sink.write_body(&self.body);
    }

    /// Replays into a fresh [`Response`].
    pub fn into_response(self) -> Response {
        let mut out = Response::empty();
        self.replay(&mut out);
        out
    }
}

impl Default for ResponseRecorder {
    fn default() -> Self { Self::new() }
}

impl ResponseWriter for ResponseRecorder {
    fn append_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    fn write_status(&mut self, code: u16) {
        self.status = code;
    }

    fn write_body(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }
}
