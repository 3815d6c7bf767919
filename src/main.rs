fn main() -> eyre::Result<()> {
    pictures::main()
}
