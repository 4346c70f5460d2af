pub type WeightStorage = Storage;
pub type GradStorage = Storage;

pub use handle::Handle;
mod handle {
    /// Generic handle for accesing blocks of memory stored within the matching Storage
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Handle {
        start: usize,
        end: usize,
    }

    impl Handle {
        pub(super) fn new(start: usize, end: usize) -> Self {
            Self { start, end }
        }

        pub(super) fn start(&self) -> usize {
            self.start
        }

        pub(super) fn end(&self) -> usize {
            self.end
        }

        pub fn len(&self) -> usize {
            self.end - self.start
        }
    }
}

pub use allocator::Allocator;
mod allocator {
    use super::*;

    /// Hands out handles while a network is being built and finishes into a [Storage](super::Storage).
    /// Zeroed blocks are only materialized once something non-zero has to follow them.
    #[derive(Debug, Clone, Default)]
    pub struct Allocator {
        mem: Vec<f32>,
        buffered: usize,
    }

    impl Allocator {
        pub fn new() -> Self {
            Default::default()
        }

        fn new_handle(&self, len: usize) -> Handle {
            let start = self.mem.len() + self.buffered;
            Handle::new(start, start + len)
        }

        fn allocate_buffered(&mut self) {
            if self.buffered > 0 {
                self.mem
                    .extend(std::iter::repeat(0.).take(self.buffered));
                self.buffered = 0;
            }
        }

        pub fn allocate_zeroed(&mut self, len: usize) -> Handle {
            let handle = self.new_handle(len);
            self.buffered += len;
            handle
        }

        pub fn allocate<I>(&mut self, len: usize, iter: I) -> Handle
        where
            I: Iterator<Item = f32>,
        {
            self.allocate_buffered();
            let len_before = self.mem.len();
            let handle = self.new_handle(len);
            self.mem.extend(iter.take(len));
            let received = self.mem.len() - len_before;
            assert_eq!(
                len, received,
                "Provided iterator did not yield enough elements. Expected: {}, Received: {}",
                len, received
            );
            handle
        }

        /// Number of floats handed out so far.
        pub fn len(&self) -> usize {
            self.mem.len() + self.buffered
        }

        pub fn finish(mut self) -> Storage {
            self.allocate_buffered();
            Storage::new(self.mem.into_boxed_slice())
        }
    }
}

pub use storage::Storage;
mod storage {
    use super::*;

    /// Flat block of floats holding the weights (or gradients) of a whole network.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Storage {
        storage: Box<[f32]>,
    }

    impl Storage {
        pub(super) fn new(storage: Box<[f32]>) -> Self {
            Self { storage }
        }

        /// Storage of `len` zeros. Handles into a weight storage of the same length are valid for it.
        pub fn zeroed(len: usize) -> Self {
            Self::new(vec![0.; len].into_boxed_slice())
        }

        pub fn get(&self, handle: Handle) -> &[f32] {
            &self.storage[handle.start()..handle.end()]
        }

        pub fn get_mut(&mut self, handle: Handle) -> &mut [f32] {
            &mut self.storage[handle.start()..handle.end()]
        }

        pub fn len(&self) -> usize {
            self.storage.len()
        }

        pub fn zero(&mut self) {
            self.storage.iter_mut().for_each(|f| *f = 0.);
        }

        /// Get a reference to the raw contents of the storage
        pub fn raw(&self) -> &[f32] {
            &self.storage
        }

        /// Get a mutable reference to the raw contents of the storage
        pub fn raw_mut(&mut self) -> &mut [f32] {
            &mut self.storage
        }
    }
}
