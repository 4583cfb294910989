fn main() -> Result<(), Box<dyn std::error::Error>> {
    wxchat::cli::main()
}
