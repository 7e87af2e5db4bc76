fn main() -> anyhow::Result<()> {
    particle_field_lib::run()
}
