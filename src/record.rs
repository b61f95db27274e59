//! Append-only score record.
//!
//! Layout: `round,<player names...>,winner,cards_played`. One row per finished
//! round with cumulative scores, then a `final` row naming the game winner.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::event::GameEvent;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub struct ScoreRecordWriter<W: Write> {
    writer: csv::Writer<W>,
    players: Vec<String>,
    pending_header: bool,
    last_totals: Vec<u32>,
    cards_played: usize,
}

impl<W: Write> ScoreRecordWriter<W> {
    /// Wrap `writer`. The header row is emitted before the first record when
    /// `write_header` is set.
    pub fn new(writer: W, players: Vec<String>, write_header: bool) -> Self {
        let last_totals = vec![0; players.len()];
        Self {
            writer: csv::WriterBuilder::new().has_headers(false).from_writer(writer),
            players,
            pending_header: write_header,
            last_totals,
            cards_played: 0,
        }
    }

    /// Write the rows implied by `event`; events other than round and game wins
    /// are ignored.
    pub fn record(&mut self, event: &GameEvent) -> Result<(), RecordError> {
        match event {
            GameEvent::RoundWon {
                round,
                winner,
                totals,
                cards_played,
                ..
            } => {
                self.last_totals = totals.clone();
                self.cards_played += cards_played;
                let name = self.name(*winner);
                self.write_row(round.to_string(), name, *cards_played)
            }
            GameEvent::GameWon { winner, .. } => {
                let name = self.name(*winner);
                self.write_row(String::from("final"), name, self.cards_played)
            }
            _ => Ok(()),
        }
    }

    pub fn flush(&mut self) -> Result<(), RecordError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, RecordError> {
        self.writer
            .into_inner()
            .map_err(|err| RecordError::Io(err.into_error()))
    }

    fn name(&self, player: usize) -> String {
        self.players
            .get(player)
            .cloned()
            .unwrap_or_else(|| format!("Player{}", player + 1))
    }

    fn write_row(
        &mut self,
        round: String,
        winner: String,
        cards_played: usize,
    ) -> Result<(), RecordError> {
        if self.pending_header {
            let mut header = Vec::with_capacity(self.players.len() + 3);
            header.push(String::from("round"));
            header.extend(self.players.iter().cloned());
            header.push(String::from("winner"));
            header.push(String::from("cards_played"));
            self.writer.write_record(&header)?;
            self.pending_header = false;
        }
        let mut row = Vec::with_capacity(self.players.len() + 3);
        row.push(round);
        row.extend(self.last_totals.iter().map(u32::to_string));
        row.push(winner);
        row.push(cards_played.to_string());
        self.writer.write_record(&row)?;
        Ok(())
    }
}

impl ScoreRecordWriter<std::fs::File> {
    /// Open `path` for appending, writing the header only when the file is new or empty.
    pub fn append_to(path: impl AsRef<Path>, players: Vec<String>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        Ok(Self::new(file, players, is_empty))
    }
}
