use std::{
    cell::RefCell,
    fmt::Debug,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

/// Receives the losses every time a [Gan](crate::gan::Gan) evaluates them.
pub trait Logger: Debug {
    fn losses(&mut self, step: u64, d_loss: f32, g_loss: f32);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockLogger;

impl Logger for MockLogger {
    fn losses(&mut self, _step: u64, _d_loss: f32, _g_loss: f32) {}
}

/// Writes one `step,d_loss,g_loss` line per evaluation.
#[derive(Debug)]
pub struct LogFile {
    file: PathBuf,
    writer: BufWriter<File>,
}

impl LogFile {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self {
            file: path.as_ref().to_owned(),
            writer: BufWriter::new(File::create(path)?),
        })
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Logger for LogFile {
    fn losses(&mut self, step: u64, d_loss: f32, g_loss: f32) {
        if let Err(e) = writeln!(self.writer, "{},{},{}", step, d_loss, g_loss) {
            eprintln!(
                "Error while logging loss to file: {}\nError: {}",
                self.file.display(),
                e
            );
        }
    }
}

/// Keeps every logged triple in memory.
#[derive(Debug, Default, Clone)]
pub struct History {
    pub entries: Vec<(u64, f32, f32)>,
}

impl Logger for History {
    fn losses(&mut self, step: u64, d_loss: f32, g_loss: f32) {
        self.entries.push((step, d_loss, g_loss));
    }
}

/// A logger that stays reachable after it is handed to a [Gan](crate::gan::Gan).
impl<L: Logger> Logger for Rc<RefCell<L>> {
    fn losses(&mut self, step: u64, d_loss: f32, g_loss: f32) {
        self.borrow_mut().losses(step, d_loss, g_loss);
    }
}
