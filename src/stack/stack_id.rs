crate::define_id_enum! {
    /// Base image the application will be built and launched on
    StackId {
        Bionic => "io.buildpacks.stacks.bionic" : "Ubuntu 18.04 (bionic)",
        Cflinuxfs3 => "org.cloudfoundry.stacks.cflinuxfs3" : "cflinuxfs3",
        Tiny => "org.cloudfoundry.stacks.tiny" : "Tiny",
    }
}

impl StackId {
    /// The bionic image ships without libicu, so globalization support must be
    /// supplied at build time.
    pub fn requires_icu(&self) -> bool {
        matches!(self, StackId::Bionic)
    }
}
