fn main() -> anyhow::Result<()> {
    alemassas::cli::run()
}
