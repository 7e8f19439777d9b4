//! Entrypoint of the iobeam binary

fn main() -> Result<(), std::io::Error> {
    iobeam::startup(std::env::args().collect())
}
