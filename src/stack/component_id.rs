crate::define_id_enum! {
    /// Named component that a build plan provides or requires
    ComponentId {
        Publish => "dotnet-build" : "dotnet publish",
        DotnetSdk => "dotnet-sdk" : ".NET Core SDK",
        DotnetRuntime => "dotnet-runtime" : ".NET Core Runtime",
        DotnetAspNetCore => "dotnet-aspnetcore" : "ASP.NET Core",
        Node => "node" : "Node.js",
        Icu => "icu" : "ICU",
    }
}
