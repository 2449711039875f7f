//! Built-in MS-900 (Microsoft 365 Fundamentals) skills outline, as
//! `(topic, [(objective, [sub_objective])])`.

pub type ObjectiveEntry = (&'static str, &'static [&'static str]);
pub type TopicEntry = (&'static str, &'static [ObjectiveEntry]);

pub const MS900_TOPICS: &[TopicEntry] = &[
    (
        "Describe cloud concepts",
        &[
            (
                "Describe the different types of cloud services available",
                &[
                    "Describe Microsoft software as a service (SaaS), infrastructure as a service (IaaS), and platform as a service (PaaS) concepts and use cases",
                    "Describe differences between Office 365 and Microsoft 365",
                ],
            ),
            (
                "Describe the benefits of and considerations for using cloud, hybrid, or on-premises services",
                &[
                    "Describe public, private, and hybrid cloud models",
                    "Compare costs and advantages of cloud, hybrid, and on-premises services",
                    "Describe the concept of hybrid work and flexible work",
                ],
            ),
        ],
    ),
    (
        "Describe Microsoft 365 apps and services",
        &[
            (
                "Describe productivity solutions of Microsoft 365",
                &[
                    "Describe the core productivity capabilities and benefits of Microsoft 365 including Microsoft Outlook and Microsoft Exchange, Microsoft 365 apps, and OneDrive",
                    "Describe core Microsoft 365 Apps including Microsoft Word, Excel, PowerPoint, Outlook, and OneNote",
                    "Describe work management capabilities of Microsoft 365 including Microsoft Project, Planner, Bookings, Forms, Lists, and To Do",
                ],
            ),
            (
                "Describe collaboration solutions of Microsoft 365",
                &[
                    "Describe the collaboration benefits and capabilities of Microsoft 365 including Microsoft Exchange, Outlook, SharePoint, OneDrive, and Stream",
                    "Describe the collaboration benefits and capabilities of Microsoft Teams and Teams Phone",
                    "Describe the Microsoft Viva apps",
                    "Describe the ways that you can extend Microsoft Teams by using collaborative apps",
                ],
            ),
            (
                "Describe endpoint modernization, management concepts, and deployment options in Microsoft 365",
                &[
                    "Describe the endpoint management capabilities of Microsoft 365 including Microsoft Intune (Configuration Manager and co-management, Endpoint Analytics, and Windows Autopilot)",
                    "Compare the differences between Windows 365 and Azure Virtual Desktop",
                    "Describe the deployment and release models for Windows-as-a-Service (WaaS) including deployment rings",
                    "Identify deployment and update channels for Microsoft 365 Apps",
                ],
            ),
            (
                "Describe analytics capabilities of Microsoft 365",
                &[
                    "Describe the capabilities of Viva Insights",
                    "Describe the capabilities of the Microsoft 365 Admin center and Microsoft 365 user portal",
                    "Describe the reports available in the Microsoft 365 Admin center and other admin centers",
                ],
            ),
        ],
    ),
    (
        "Describe security, compliance, privacy, and trust in Microsoft 365",
        &[
            (
                "Describe identity and access management solutions of Microsoft 365",
                &[
                    "Describe the identity and access management capabilities of Microsoft Entra ID",
                    "Describe cloud identity, on-premises identity, and hybrid identity concepts",
                    "Describe how Microsoft uses methods such as multi-factor authentication (MFA), self-service password reset (SSPR), and conditional access, to keep identities, access, and data secure",
                ],
            ),
            (
                "Describe threat protection solutions of Microsoft 365",
                &[
                    "Describe Microsoft Defender XDR, Defender for Endpoint, Defender for Office 365, Defender for Identity, Defender for Cloud Apps, and the Microsoft Defender Portal",
                    "Describe Microsoft Secure Score benefits and capabilities",
                    "Describe how Microsoft 365 addresses the most common types of threats against endpoints, applications, and identities",
                ],
            ),
            (
                "Describe trust, privacy, risk, and compliance solutions of Microsoft 365",
                &[
                    "Describe the Zero Trust Model",
                    "Describe Microsoft Purview compliance solutions such as insider risk, auditing, and eDiscovery",
                    "Describe Microsoft Purview Information Protection features such as sensitivity labels and data loss prevention",
                    "Describe how Microsoft supports data residency to ensure regulatory compliance",
                    "Describe the capabilities and benefits of Microsoft Priva",
                ],
            ),
        ],
    ),
    (
        "Describe Microsoft 365 pricing, licensing, and support",
        &[
            (
                "Identify Microsoft 365 pricing and billing management options",
                &[
                    "Describe the pricing model for Microsoft cloud services including enterprise agreements, cloud solution providers, and direct billing",
                    "Describe available billing and bill management options including billing frequency and methods of payment",
                ],
            ),
            (
                "Identify licensing options available in Microsoft 365",
                &[
                    "Describe license management",
                    "Describe the differences between base licensing and add-on licensing",
                ],
            ),
            (
                "Identify support options for Microsoft 365 services",
                &[
                    "Describe how to create a support request for Microsoft 365 services",
                    "Describe support options for Microsoft 365 services",
                    "Describe service-level agreements (SLAs) including service credits",
                    "Determine service health status by using the Microsoft 365 admin center or the Microsoft Entra admin center",
                ],
            ),
        ],
    ),
];
