pub mod page_allocator;

pub use page_allocator::{PageAllocator, PageNum, FRAME_ALLOCATOR};

#[cfg(target_arch = "riscv64")]
pub fn init() {
    page_allocator::init();
}
