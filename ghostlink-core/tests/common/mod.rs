//! Scripted collaborators for driving whole sessions

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use ghostlink_core::menu::Menu;
use ghostlink_core::traits::{
    DialogOutcome, DialogWidget, FilePicker, MenuWidget, PromptWidget, ResponseSurface, Ui,
};
use ghostlink_hal::{Clock, EntryName, PayloadStore, StorageError, UartRx, UartTx};

/// Firmware stand-in: records writes, replays reads
pub struct FakeLink {
    pub written: Vec<u8>,
    pub replies: VecDeque<&'static [u8]>,
    pub fail_writes: bool,
    pub now: Rc<Cell<u64>>,
}

impl FakeLink {
    pub fn new(replies: &[&'static [u8]], now: Rc<Cell<u64>>) -> Self {
        Self {
            written: Vec::new(),
            replies: replies.iter().copied().collect(),
            fail_writes: false,
            now,
        }
    }

    pub fn written_str(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }
}

impl UartTx for FakeLink {
    type Error = ();

    fn write_all(&mut self, data: &[u8]) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.written.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

impl UartRx for FakeLink {
    type Error = ();

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, ()> {
        // Nothing is buffered before the first real poll
        if timeout_ms == 0 {
            return Ok(0);
        }
        match self.replies.pop_front() {
            Some(bytes) => {
                buf[..bytes.len()].copy_from_slice(bytes);
                Ok(bytes.len())
            }
            None => {
                self.now.set(self.now.get() + timeout_ms as u64);
                Ok(0)
            }
        }
    }
}

pub struct FakeClock {
    pub now: Rc<Cell<u64>>,
    pub delays: Vec<u32>,
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.now.set(self.now.get() + ms as u64);
    }
}

pub fn link_and_clock(replies: &[&'static [u8]]) -> (FakeLink, FakeClock) {
    let now = Rc::new(Cell::new(0));
    let link = FakeLink::new(replies, now.clone());
    let clock = FakeClock {
        now,
        delays: Vec::new(),
    };
    (link, clock)
}

/// Response surface dismissed after a fixed number of polls
pub struct FakeSurface {
    pub polls_per_cycle: u32,
    left: u32,
    pub headers: Vec<String>,
    pub content: Vec<u8>,
}

impl ResponseSurface for FakeSurface {
    fn open(&mut self, header: &str) {
        self.headers.push(header.to_string());
        self.content.clear();
        self.left = self.polls_per_cycle;
    }

    fn append(&mut self, bytes: &[u8]) {
        self.content.extend_from_slice(bytes);
    }

    fn is_open(&mut self) -> bool {
        if self.left == 0 {
            return false;
        }
        self.left -= 1;
        true
    }
}

/// User stand-in answering from queues
///
/// An exhausted menu queue backs out and an exhausted dialog queue
/// confirms, so every scripted session ends.
pub struct ScriptedUi {
    pub choices: VecDeque<Option<usize>>,
    pub inputs: VecDeque<Option<&'static str>>,
    pub dialogs: VecDeque<DialogOutcome>,
    pub picks: VecDeque<Option<usize>>,
    pub menus_shown: Vec<&'static str>,
    pub messages: Vec<(String, String)>,
    pub surface: FakeSurface,
}

impl ScriptedUi {
    pub fn new(choices: &[Option<usize>]) -> Self {
        Self {
            choices: choices.iter().copied().collect(),
            inputs: VecDeque::new(),
            dialogs: VecDeque::new(),
            picks: VecDeque::new(),
            menus_shown: Vec::new(),
            messages: Vec::new(),
            surface: FakeSurface {
                polls_per_cycle: 2,
                left: 0,
                headers: Vec::new(),
                content: Vec::new(),
            },
        }
    }

    pub fn with_inputs(mut self, inputs: &[Option<&'static str>]) -> Self {
        self.inputs = inputs.iter().copied().collect();
        self
    }

    pub fn with_dialogs(mut self, dialogs: &[DialogOutcome]) -> Self {
        self.dialogs = dialogs.iter().copied().collect();
        self
    }

    pub fn with_picks(mut self, picks: &[Option<usize>]) -> Self {
        self.picks = picks.iter().copied().collect();
        self
    }
}

impl MenuWidget for ScriptedUi {
    fn show(&mut self, menu: &Menu) -> Option<usize> {
        self.menus_shown.push(menu.header);
        self.choices.pop_front().flatten()
    }
}

impl PromptWidget for ScriptedUi {
    fn prompt(&mut self, _header: &str, _default: &str) -> Option<heapless::String<64>> {
        let text = self.inputs.pop_front().flatten()?;
        heapless::String::try_from(text).ok()
    }
}

impl DialogWidget for ScriptedUi {
    fn confirm(&mut self, _header: &str, _text: &str) -> DialogOutcome {
        self.dialogs.pop_front().unwrap_or(DialogOutcome::Confirm)
    }

    fn message(&mut self, header: &str, text: &str) {
        self.messages.push((header.to_string(), text.to_string()));
    }
}

impl FilePicker for ScriptedUi {
    fn pick(&mut self, _header: &str, entries: &[EntryName]) -> Option<usize> {
        self.picks.pop_front().flatten().filter(|i| *i < entries.len())
    }
}

impl Ui for ScriptedUi {
    type Surface = FakeSurface;

    fn surface(&mut self) -> &mut FakeSurface {
        &mut self.surface
    }
}

/// In-memory payload store
#[derive(Default)]
pub struct MemStore {
    pub files: Vec<(&'static str, &'static [u8])>,
}

impl MemStore {
    fn find(&self, name: &str) -> Result<&'static [u8], StorageError> {
        self.files
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, body)| *body)
            .ok_or(StorageError::NotFound)
    }
}

impl PayloadStore for MemStore {
    fn entries(&mut self) -> Result<heapless::Vec<EntryName, 32>, StorageError> {
        let mut entries = heapless::Vec::new();
        for (name, _) in &self.files {
            let name = EntryName::try_from(*name).map_err(|_| StorageError::InvalidName)?;
            entries.push(name).map_err(|_| StorageError::BufferTooSmall)?;
        }
        Ok(entries)
    }

    fn size(&mut self, name: &str) -> Result<usize, StorageError> {
        self.find(name).map(<[u8]>::len)
    }

    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let body = self.find(name)?;
        let target = buffer
            .get_mut(..body.len())
            .ok_or(StorageError::BufferTooSmall)?;
        target.copy_from_slice(body);
        Ok(body.len())
    }
}
