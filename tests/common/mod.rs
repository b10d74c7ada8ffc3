//! Shared test helpers
//!
//! `MockServer` is an in-memory memcached stand-in. Bytes written to it are
//! parsed as request frames and answered immediately; reads drain the
//! answers. When nothing is left to read it reports end of stream, so a
//! client waiting for bytes that never come fails instead of hanging.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::{self, Read, Write};
use std::rc::Rc;

use binprot::protocol::{Opcode, RequestHeader, ResponseHeader, Status, HEADER_SIZE};
use binprot::ReadWriter;

// =============================================================================
// Canned Frames
// =============================================================================

/// Encode a complete response frame
pub fn response(opcode: Opcode, status: u16, extras: &[u8], value: &[u8], opaque: u32) -> Vec<u8> {
    let mut header = ResponseHeader::new(opcode, status);
    header.extra_length = extras.len() as u8;
    header.total_body_length = (extras.len() + value.len()) as u32;
    header.opaque = opaque;

    let mut bytes = header.encode().to_vec();
    bytes.extend_from_slice(extras);
    bytes.extend_from_slice(value);
    bytes
}

/// A successful GET-style response carrying zero flags
pub fn hit(opcode: Opcode, value: &[u8]) -> Vec<u8> {
    response(opcode, 0, &0u32.to_be_bytes(), value, 0)
}

/// A KeyNotFound response with the usual memcached body
pub fn miss(opcode: Opcode) -> Vec<u8> {
    response(opcode, Status::KeyNotFound as u16, &[], b"Not found", 0)
}

pub fn noop() -> Vec<u8> {
    response(Opcode::Noop, 0, &[], &[], 0)
}

// =============================================================================
// Mock Server
// =============================================================================

/// One request frame as the server saw it
#[derive(Debug, Clone)]
pub struct Received {
    pub header: RequestHeader,
    pub extras: Vec<u8>,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

#[derive(Default)]
struct State {
    /// key -> (value, expiration)
    store: HashMap<Vec<u8>, (Vec<u8>, u32)>,
    inbound: Vec<u8>,
    outbound: VecDeque<u8>,
    received: Vec<Received>,
    flushes: usize,
    opaque_override: Option<u32>,
}

#[derive(Clone, Default)]
pub struct MockServer {
    state: Rc<RefCell<State>>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffered connection to this server
    pub fn connect(&self) -> ReadWriter<MockServer, MockServer> {
        ReadWriter::new(self.clone(), self.clone())
    }

    pub fn insert(&self, key: &[u8], value: &[u8]) {
        self.state
            .borrow_mut()
            .store
            .insert(key.to_vec(), (value.to_vec(), 0));
    }

    pub fn value(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.state.borrow().store.get(key).map(|(v, _)| v.clone())
    }

    pub fn expiration(&self, key: &[u8]) -> Option<u32> {
        self.state.borrow().store.get(key).map(|(_, e)| *e)
    }

    pub fn received(&self) -> Vec<Received> {
        self.state.borrow().received.clone()
    }

    pub fn flushes(&self) -> usize {
        self.state.borrow().flushes
    }

    /// Answer every following request with this opaque instead of echoing
    pub fn answer_with_opaque(&self, opaque: u32) {
        self.state.borrow_mut().opaque_override = Some(opaque);
    }

    /// Queue raw bytes ahead of any generated answer
    pub fn push_raw(&self, bytes: &[u8]) {
        self.state.borrow_mut().outbound.extend(bytes.iter().copied());
    }

    pub fn pending_output(&self) -> usize {
        self.state.borrow().outbound.len()
    }
}

impl State {
    fn process(&mut self) {
        loop {
            if self.inbound.len() < HEADER_SIZE {
                return;
            }
            let mut raw = [0u8; HEADER_SIZE];
            raw.copy_from_slice(&self.inbound[..HEADER_SIZE]);
            let header = RequestHeader::parse(&raw).unwrap();

            let frame_len = HEADER_SIZE + header.total_body_length as usize;
            if self.inbound.len() < frame_len {
                return;
            }

            let frame: Vec<u8> = self.inbound.drain(..frame_len).collect();
            let extras_end = HEADER_SIZE + header.extra_length as usize;
            let key_end = extras_end + header.key_length as usize;
            let received = Received {
                header,
                extras: frame[HEADER_SIZE..extras_end].to_vec(),
                key: frame[extras_end..key_end].to_vec(),
                value: frame[key_end..].to_vec(),
            };

            let answer = self.answer(&received);
            self.received.push(received);
            self.outbound.extend(answer);
        }
    }

    fn answer(&mut self, req: &Received) -> Vec<u8> {
        let opcode = req.header.opcode;
        let opaque = self.opaque_override.unwrap_or(req.header.opaque);
        let ok = |extras: &[u8], value: &[u8]| response(opcode, 0, extras, value, opaque);
        let err = |status: Status| {
            response(opcode, status as u16, &[], status.as_str().as_bytes(), opaque)
        };
        let present = self.store.contains_key(&req.key);

        match opcode {
            Opcode::Get | Opcode::GetQ => match self.store.get(&req.key) {
                Some((value, _)) => ok(&0u32.to_be_bytes(), value),
                None => err(Status::KeyNotFound),
            },
            Opcode::Gat => match self.store.get_mut(&req.key) {
                Some((value, exp)) => {
                    *exp = be_u32(&req.extras[0..4]);
                    ok(&0u32.to_be_bytes(), value)
                }
                None => err(Status::KeyNotFound),
            },
            Opcode::Set | Opcode::Add | Opcode::Replace => {
                if opcode == Opcode::Add && present {
                    return err(Status::KeyExists);
                }
                if opcode == Opcode::Replace && !present {
                    return err(Status::KeyNotFound);
                }
                let exp = be_u32(&req.extras[4..8]);
                self.store
                    .insert(req.key.clone(), (req.value.clone(), exp));
                ok(&[], &[])
            }
            Opcode::Delete => match self.store.remove(&req.key) {
                Some(_) => ok(&[], &[]),
                None => err(Status::KeyNotFound),
            },
            Opcode::Touch => match self.store.get_mut(&req.key) {
                Some((_, exp)) => {
                    *exp = be_u32(&req.extras[0..4]);
                    ok(&[], &[])
                }
                None => err(Status::KeyNotFound),
            },
            Opcode::Noop => ok(&[], &[]),
        }
    }
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

impl Write for MockServer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        state.inbound.extend_from_slice(buf);
        state.process();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }
}

impl Read for MockServer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        let n = buf.len().min(state.outbound.len());
        for (slot, byte) in buf.iter_mut().zip(state.outbound.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}
