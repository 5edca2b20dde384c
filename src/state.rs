#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CarouselPhase {
    Loading,       // Waiting for every picture to finish loading
    Entering,      // Overlay fading out, cards rising into place
    Idle,          // Interactive, waiting for a swap
    Transitioning, // Caption swap timeline running, swaps are ignored
}
