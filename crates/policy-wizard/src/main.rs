fn main() -> anyhow::Result<()> {
    policy_wizard::cli::main()
}
