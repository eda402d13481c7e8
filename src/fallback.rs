use rand::Rng;

/// Roasts served when the real one cannot be had.
pub const FALLBACK_ROASTS: [&str; 6] = [
    "This person looks like they debug code by changing random variables until it works.",
    "Bro really said 'let me take a selfie' and forgot to install confidence.exe first.",
    "Looking like a Stack Overflow question that nobody wants to answer.",
    "This is what happens when you order charisma from AliExpress.",
    "Face.exe has stopped working. Would you like to restart?",
    "This person definitely uses Internet Explorer by choice.",
];

/// Picks one fallback roast uniformly at random.
pub fn random_fallback() -> &'static str {
    random_fallback_with(&mut rand::thread_rng())
}

pub fn random_fallback_with<R: Rng>(rng: &mut R) -> &'static str {
    FALLBACK_ROASTS[rng.gen_range(0..FALLBACK_ROASTS.len())]
}
